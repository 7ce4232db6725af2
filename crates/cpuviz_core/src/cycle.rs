//! Narrated fetch/decode/execute/writeback cycle.
//!
//! The narration is cosmetic: a [`Cycle`] holds each phase for the time given
//! by its [`Pacing`] and applies the instruction exactly once, on entering
//! [`Phase::Writeback`]. Frontends feed it elapsed time through
//! [`Cycle::tick`], so the same machine drives both the terminal (which
//! sleeps) and the pixel app (which counts frames).

use std::time::Duration;

use typed_builder::TypedBuilder;

use crate::cpu::CpuState;
use crate::instruction::Instruction;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Fetch,
    Decode,
    Execute,
    Writeback,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Fetch, Phase::Decode, Phase::Execute, Phase::Writeback];

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Fetch => "Fetch",
            Phase::Decode => "Decode",
            Phase::Execute => "Execute",
            Phase::Writeback => "Writeback",
        }
    }

    /// Status line shown while the phase is held. Writeback shows the
    /// instruction's result instead.
    pub const fn status(self) -> Option<&'static str> {
        match self {
            Phase::Fetch => Some("Fetching instruction from memory..."),
            Phase::Decode => Some("Decoding instruction..."),
            Phase::Execute => Some("Executing operation..."),
            Phase::Writeback => None,
        }
    }

    /// One-line explanation of what a real CPU does in this phase.
    pub const fn summary(self) -> &'static str {
        match self {
            Phase::Fetch => "Retrieve instruction from memory",
            Phase::Decode => "Determine what operation to perform",
            Phase::Execute => "Carry out the operation",
            Phase::Writeback => "Update registers/memory",
        }
    }

    const fn next(self) -> Option<Phase> {
        match self {
            Phase::Fetch => Some(Phase::Decode),
            Phase::Decode => Some(Phase::Execute),
            Phase::Execute => Some(Phase::Writeback),
            Phase::Writeback => None,
        }
    }
}

/// How long each narrated phase is held.
#[derive(Copy, Clone, Eq, PartialEq, Debug, TypedBuilder)]
pub struct Pacing {
    #[builder(default = Duration::from_millis(1000))]
    pub fetch: Duration,
    #[builder(default = Duration::from_millis(500))]
    pub decode: Duration,
    #[builder(default = Duration::from_millis(1000))]
    pub execute: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::builder().build()
    }
}

impl Pacing {
    /// Every phase is zero-length.
    pub fn instant() -> Self {
        Pacing::builder()
            .fetch(Duration::ZERO)
            .decode(Duration::ZERO)
            .execute(Duration::ZERO)
            .build()
    }

    pub fn hold(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Fetch => self.fetch,
            Phase::Decode => self.decode,
            Phase::Execute => self.execute,
            Phase::Writeback => Duration::ZERO,
        }
    }

    pub fn total(&self) -> Duration {
        self.fetch + self.decode + self.execute
    }
}

/// What a finished cycle reports.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Outcome {
    pub description: Option<&'static str>,
    /// Program counter after the instruction was applied.
    pub program_counter: u64,
}

#[derive(Clone, Debug)]
pub struct Cycle {
    instruction: Instruction,
    listing: String,
    pacing: Pacing,
    phase: Phase,
    remaining: Duration,
    outcome: Option<Outcome>,
}

impl Cycle {
    /// Begins a cycle in [`Phase::Fetch`]. The listing line uses the program
    /// counter as it is before the instruction runs.
    pub fn start(instruction: Instruction, state: &CpuState, pacing: Pacing) -> Self {
        log::debug!("{} cycle starts at pc {}", instruction, state.program_counter());
        Self {
            instruction,
            listing: instruction.listing(state.program_counter()),
            pacing,
            phase: Phase::Fetch,
            remaining: pacing.hold(Phase::Fetch),
            outcome: None,
        }
    }

    pub fn instruction(&self) -> Instruction {
        self.instruction
    }

    pub fn listing(&self) -> &str {
        &self.listing
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Time left in the current phase.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Advances the narration by `dt` and returns the phases entered, in
    /// order. A single call may cross several phases. Once writeback has
    /// been reached further ticks do nothing.
    pub fn tick(&mut self, dt: Duration, state: &mut CpuState) -> Vec<Phase> {
        let mut entered = Vec::new();
        let mut budget = dt;
        while self.outcome.is_none() {
            if budget < self.remaining {
                self.remaining -= budget;
                break;
            }
            budget -= self.remaining;
            let Some(next) = self.phase.next() else {
                break;
            };
            self.enter(next, state);
            entered.push(next);
        }
        entered
    }

    fn enter(&mut self, phase: Phase, state: &mut CpuState) {
        log::debug!("{}: {}", self.listing, phase.name());
        self.phase = phase;
        self.remaining = self.pacing.hold(phase);
        if phase == Phase::Writeback {
            let description = state.execute(self.instruction);
            self.outcome = Some(Outcome {
                description,
                program_counter: state.program_counter(),
            });
        }
    }
}

#[cfg(test)]
mod tests;
