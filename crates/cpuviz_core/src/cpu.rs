use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};

use crate::{NUM_MEMORY_CELLS, NUM_REGS};

/// Addresses of the memory cells, in display order.
pub const MEMORY_ADDRESSES: [u16; NUM_MEMORY_CELLS] = [0x1000, 0x1004, 0x1008];

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Register {
    Ax,
    Bx,
    Cx,
    Dx,
}

impl Register {
    pub const ALL: [Register; NUM_REGS] = [Register::Ax, Register::Bx, Register::Cx, Register::Dx];

    pub const fn name(self) -> &'static str {
        match self {
            Register::Ax => "AX",
            Register::Bx => "BX",
            Register::Cx => "CX",
            Register::Dx => "DX",
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Register {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Register::ALL
            .into_iter()
            .find(|reg| reg.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("unknown register '{}' (expected AX, BX, CX or DX)", s))
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Registers([i64; NUM_REGS]);

impl Registers {
    #[inline]
    pub fn get(&self, reg: Register) -> i64 {
        self.0[reg.index()]
    }

    #[inline]
    pub fn set(&mut self, reg: Register, value: i64) {
        self.0[reg.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Register, i64)> + '_ {
        Register::ALL.into_iter().map(|reg| (reg, self.get(reg)))
    }
}

/// Label of a memory address as shown to the user, e.g. `0x1000`.
pub fn address_label(addr: u16) -> String {
    format!("0x{:04X}", addr)
}

/// Parses `0x1000`-style (or plain decimal) addresses. Whether the address is
/// mapped is checked by [`Memory`], not here.
pub fn parse_address(s: &str) -> Result<u16> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| anyhow!("invalid address '{}': {}", s, e))
}

/// The fixed set of memory cells. Cells can be read and written but never
/// added or removed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Memory([i64; NUM_MEMORY_CELLS]);

impl Memory {
    fn slot(addr: u16) -> Option<usize> {
        MEMORY_ADDRESSES.iter().position(|&a| a == addr)
    }

    pub fn read(&self, addr: u16) -> Option<i64> {
        Self::slot(addr).map(|i| self.0[i])
    }

    pub fn write(&mut self, addr: u16, value: i64) -> Result<()> {
        let Some(i) = Self::slot(addr) else {
            bail!("address {} is not mapped", address_label(addr));
        };
        self.0[i] = value;
        Ok(())
    }

    /// Write to a cell from [`MEMORY_ADDRESSES`]; used by the effect model,
    /// whose targets are fixed.
    pub(crate) fn store(&mut self, slot: usize, value: i64) {
        self.0[slot] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, i64)> + '_ {
        MEMORY_ADDRESSES.into_iter().zip(self.0)
    }
}

/// Snapshot of the toy CPU: registers, memory and the program counter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CpuState {
    pub registers: Registers,
    pub memory: Memory,
    /// Number of instructions applied so far.
    program_counter: u64,
}

impl CpuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn program_counter(&self) -> u64 {
        self.program_counter
    }

    pub(crate) fn advance_pc(&mut self) {
        self.program_counter += 1;
    }

    pub fn register(&self, reg: Register) -> i64 {
        self.registers.get(reg)
    }

    pub fn set_register(&mut self, reg: Register, value: i64) {
        self.registers.set(reg, value);
    }

    pub fn read_memory(&self, addr: u16) -> Option<i64> {
        self.memory.read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: i64) -> Result<()> {
        self.memory.write(addr, value)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_all_zero() {
        let state = CpuState::new();
        assert_eq!(state.program_counter(), 0);
        assert!(state.registers.iter().all(|(_, v)| v == 0));
        assert!(state.memory.iter().all(|(_, v)| v == 0));
        assert_eq!(state.memory.iter().count(), NUM_MEMORY_CELLS);
    }

    #[test]
    fn registers_parse_case_insensitively() {
        assert_eq!("ax".parse::<Register>().unwrap(), Register::Ax);
        assert_eq!("DX".parse::<Register>().unwrap(), Register::Dx);
        assert!("EX".parse::<Register>().is_err());
    }

    #[test]
    fn addresses_parse_hex_and_decimal() {
        assert_eq!(parse_address("0x1004").unwrap(), 0x1004);
        assert_eq!(parse_address("4096").unwrap(), 0x1000);
        assert!(parse_address("0xZZ").is_err());
        assert_eq!(address_label(0x1008), "0x1008");
    }

    #[test]
    fn unmapped_memory_is_rejected() {
        let mut state = CpuState::new();
        assert!(state.write_memory(0x2000, 1).is_err());
        assert_eq!(state.read_memory(0x2000), None);
        assert_eq!(state.memory.iter().count(), NUM_MEMORY_CELLS);

        state.write_memory(0x1004, 9).unwrap();
        assert_eq!(state.read_memory(0x1004), Some(9));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = CpuState::new();
        state.set_register(Register::Bx, 5);
        state.write_memory(0x1008, 2).unwrap();
        state.advance_pc();
        state.reset();
        assert_eq!(state, CpuState::new());
    }
}
