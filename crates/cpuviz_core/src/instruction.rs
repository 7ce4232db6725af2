use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};

use crate::NUM_INSTRUCTIONS;

/// The six toy instructions, in catalog order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Instruction {
    #[default]
    Add,
    Mov,
    Cmp,
    Jmp,
    Load,
    Store,
}

impl Instruction {
    pub const ALL: [Instruction; NUM_INSTRUCTIONS] = [
        Instruction::Add,
        Instruction::Mov,
        Instruction::Cmp,
        Instruction::Jmp,
        Instruction::Load,
        Instruction::Store,
    ];

    pub const fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Add => "ADD",
            Instruction::Mov => "MOV",
            Instruction::Cmp => "CMP",
            Instruction::Jmp => "JMP",
            Instruction::Load => "LOAD",
            Instruction::Store => "STORE",
        }
    }

    /// Catalog description shown next to the mnemonic.
    pub const fn description(self) -> &'static str {
        match self {
            Instruction::Add => "Add two registers",
            Instruction::Mov => "Move value between registers",
            Instruction::Cmp => "Compare two values",
            Instruction::Jmp => "Jump to memory address",
            Instruction::Load => "Load from memory",
            Instruction::Store => "Store to memory",
        }
    }

    /// Position in [`Instruction::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Listing line for this instruction at program counter `pc`, e.g. `3: ADD`.
    pub fn listing(self, pc: u64) -> String {
        format!("{}: {}", pc, self.mnemonic())
    }
}

/// Read-only view of the catalog as `(mnemonic, description)` pairs.
pub fn catalog() -> impl Iterator<Item = (&'static str, &'static str)> {
    Instruction::ALL
        .into_iter()
        .map(|ins| (ins.mnemonic(), ins.description()))
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Instruction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match Instruction::ALL
            .into_iter()
            .find(|ins| ins.mnemonic().eq_ignore_ascii_case(s.trim()))
        {
            Some(ins) => Ok(ins),
            None => bail!("'{}' is not in the instruction catalog", s.trim()),
        }
    }
}
