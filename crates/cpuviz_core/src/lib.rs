pub mod app;
pub mod cpu;
pub mod cycle;
pub mod effect;
pub mod instruction;

pub use app::VisualizerApp;
pub use cpu::{CpuState, Memory, Register, Registers};
pub use cycle::{Cycle, Outcome, Pacing, Phase};
pub use effect::{apply, Effect};
pub use instruction::Instruction;

pub const NUM_REGS: usize = 4;
pub const NUM_MEMORY_CELLS: usize = 3;
pub const NUM_INSTRUCTIONS: usize = 6;

/// Logical screen width in pixels of the pixel frontend.
pub const SCREEN_WIDTH: usize = 128;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 96;
/// Default integer scaling factor for the SDL2 frontend.
pub const SCREEN_SCALE: u32 = 6;
