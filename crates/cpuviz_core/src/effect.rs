use crate::cpu::{CpuState, Register};
use crate::instruction::Instruction;

/// Slot of `0x1000` in [`crate::cpu::MEMORY_ADDRESSES`], the target of LOAD.
const LOAD_SLOT: usize = 0;

/// Result of applying one instruction.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Effect {
    pub state: CpuState,
    /// What changed, or `None` for instructions without a modelled effect.
    pub description: Option<&'static str>,
}

/// Applies `instruction` to a copy of `state`.
pub fn apply(instruction: Instruction, mut state: CpuState) -> Effect {
    let description = state.execute(instruction);
    Effect { state, description }
}

impl CpuState {
    /// Applies `instruction` in place and bumps the program counter.
    ///
    /// Only ADD, MOV and LOAD touch registers or memory; CMP, JMP and STORE
    /// are recognised but only advance the program counter.
    pub fn execute(&mut self, instruction: Instruction) -> Option<&'static str> {
        let description = match instruction {
            Instruction::Add => {
                let sum = self
                    .register(Register::Ax)
                    .wrapping_add(self.register(Register::Bx));
                self.set_register(Register::Ax, sum);
                Some("AX = AX + BX")
            }
            Instruction::Mov => {
                self.set_register(Register::Cx, self.register(Register::Ax));
                Some("CX = AX")
            }
            Instruction::Load => {
                self.memory.store(LOAD_SLOT, self.register(Register::Ax));
                Some("[0x1000] = AX")
            }
            Instruction::Cmp | Instruction::Jmp | Instruction::Store => None,
        };
        self.advance_pc();
        log::info!(
            "{} executed, pc now {}",
            instruction,
            self.program_counter()
        );
        description
    }
}
