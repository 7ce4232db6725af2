//! Line-oriented terminal frontend.
//!
//! Reads one command per line and narrates each instruction's cycle, holding
//! every phase for the configured pacing.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::thread;

use anyhow::{bail, Context, Result};

use cpuviz_core::cpu::{address_label, parse_address};
use cpuviz_core::instruction::catalog;
use cpuviz_core::{CpuState, Cycle, Instruction, Pacing, Phase, Register};

const HELP: &str = "\
commands:
  <mnemonic>          run one instruction (ADD, MOV, CMP, JMP, LOAD, STORE)
  list                show the instruction catalog
  state               show registers, memory and the program counter
  set <REG|ADDR> <N>  seed a register (AX..DX) or memory cell (0x1000..)
  reset               start over from a zeroed CPU
  phases              explain the fetch/decode/execute/writeback cycle
  help                show this text
  quit                leave";

#[derive(Debug, PartialEq, Eq)]
enum Target {
    Register(Register),
    Memory(u16),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Instruction),
    List,
    State,
    Set(Target, i64),
    Reset,
    Phases,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };
        let command = match head.to_ascii_lowercase().as_str() {
            "list" | "catalog" => Command::List,
            "state" => Command::State,
            "reset" => Command::Reset,
            "phases" => Command::Phases,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "set" => {
                let (Some(target), Some(value), None) = (words.next(), words.next(), words.next())
                else {
                    bail!("usage: set <REG|ADDR> <value>");
                };
                let target = match target.parse::<Register>() {
                    Ok(reg) => Target::Register(reg),
                    Err(_) => Target::Memory(parse_address(target)?),
                };
                let value = value
                    .parse::<i64>()
                    .with_context(|| format!("invalid value '{}'", value))?;
                return Ok(Command::Set(target, value));
            }
            _ => Command::Run(head.parse::<Instruction>()?),
        };
        if let Some(extra) = words.next() {
            bail!("unexpected argument '{}'", extra);
        }
        Ok(command)
    }
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    pacing: Pacing,
    pub state: CpuState,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, pacing: Pacing) -> Self {
        Self {
            input,
            output,
            pacing,
            state: CpuState::new(),
        }
    }

    /// Runs commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        log::info!("Terminal frontend init");
        writeln!(self.output, "CPU Instruction Visualizer (type `help` for commands)")?;
        self.print_catalog()?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.dispatch(command)?,
                Err(err) => {
                    log::warn!("rejected input {:?}: {}", line.trim(), err);
                    writeln!(self.output, "error: {}", err)?;
                }
            }
        }
        log::info!("Terminal frontend exit");
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Run(instruction) => self.run_instruction(instruction),
            Command::List => self.print_catalog(),
            Command::State => self.print_state(),
            Command::Set(Target::Register(reg), value) => {
                self.state.set_register(reg, value);
                self.print_state()
            }
            Command::Set(Target::Memory(addr), value) => {
                match self.state.write_memory(addr, value) {
                    Ok(()) => self.print_state(),
                    Err(err) => {
                        writeln!(self.output, "error: {}", err)?;
                        Ok(())
                    }
                }
            }
            Command::Reset => {
                self.state.reset();
                writeln!(self.output, "CPU reset")?;
                self.print_state()
            }
            Command::Phases => self.print_phases(),
            Command::Help => {
                writeln!(self.output, "{}", HELP)?;
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn run_instruction(&mut self, instruction: Instruction) -> Result<()> {
        let mut cycle = Cycle::start(instruction, &self.state, self.pacing);
        writeln!(self.output, "{}", cycle.listing())?;
        self.print_status(cycle.phase())?;
        while !cycle.is_done() {
            let hold = cycle.remaining();
            if !hold.is_zero() {
                thread::sleep(hold);
            }
            for phase in cycle.tick(hold, &mut self.state) {
                self.print_status(phase)?;
            }
        }
        match cycle.outcome().and_then(|o| o.description) {
            Some(description) => writeln!(self.output, "  done: {}", description)?,
            None => writeln!(self.output, "  done: no state change")?,
        }
        self.print_state()
    }

    fn print_status(&mut self, phase: Phase) -> Result<()> {
        if let Some(status) = phase.status() {
            writeln!(self.output, "  {}", status)?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn print_catalog(&mut self) -> Result<()> {
        for (mnemonic, description) in catalog() {
            writeln!(self.output, "  {:<6}{}", mnemonic, description)?;
        }
        Ok(())
    }

    fn print_phases(&mut self) -> Result<()> {
        for (i, phase) in Phase::ALL.into_iter().enumerate() {
            writeln!(self.output, "  {}. {}: {}", i + 1, phase.name(), phase.summary())?;
        }
        Ok(())
    }

    fn print_state(&mut self) -> Result<()> {
        let registers = self
            .state
            .registers
            .iter()
            .map(|(reg, value)| format!("{}={}", reg, value))
            .collect::<Vec<_>>()
            .join(" ");
        let memory = self
            .state
            .memory
            .iter()
            .map(|(addr, value)| format!("[{}]={}", address_label(addr), value))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(self.output, "  registers: {}", registers)?;
        writeln!(self.output, "  memory:    {}", memory)?;
        writeln!(self.output, "  pc:        {}", self.state.program_counter())?;
        Ok(())
    }
}
