use super::*;
use crate::cpu::Register;
use crate::effect::apply;
use proptest::prelude::*;

const MS: Duration = Duration::from_millis(1);

#[test]
fn default_pacing_matches_the_narration() {
    let pacing = Pacing::default();
    assert_eq!(pacing.hold(Phase::Fetch), Duration::from_millis(1000));
    assert_eq!(pacing.hold(Phase::Decode), Duration::from_millis(500));
    assert_eq!(pacing.hold(Phase::Execute), Duration::from_millis(1000));
    assert_eq!(pacing.hold(Phase::Writeback), Duration::ZERO);
    assert_eq!(pacing.total(), Duration::from_millis(2500));
}

#[test]
fn phases_are_visited_in_order() {
    let mut state = CpuState::new();
    let mut cycle = Cycle::start(Instruction::Mov, &state, Pacing::default());
    assert_eq!(cycle.phase(), Phase::Fetch);
    assert_eq!(cycle.listing(), "0: MOV");

    assert!(cycle.tick(999 * MS, &mut state).is_empty());
    assert_eq!(cycle.tick(MS, &mut state), vec![Phase::Decode]);
    assert_eq!(cycle.tick(500 * MS, &mut state), vec![Phase::Execute]);
    assert_eq!(state.program_counter(), 0);
    assert!(!cycle.is_done());

    assert_eq!(cycle.tick(1000 * MS, &mut state), vec![Phase::Writeback]);
    assert!(cycle.is_done());
    assert_eq!(
        cycle.outcome(),
        Some(&Outcome {
            description: Some("CX = AX"),
            program_counter: 1,
        })
    );
}

#[test]
fn state_is_untouched_before_writeback() {
    let mut state = CpuState::new();
    state.set_register(Register::Bx, 2);
    let before = state;
    let mut cycle = Cycle::start(Instruction::Add, &state, Pacing::default());
    cycle.tick(2499 * MS, &mut state);
    assert_eq!(cycle.phase(), Phase::Execute);
    assert_eq!(state, before);
}

#[test]
fn one_long_tick_crosses_every_phase() {
    let mut state = CpuState::new();
    let mut cycle = Cycle::start(Instruction::Load, &state, Pacing::default());
    let entered = cycle.tick(Duration::from_secs(10), &mut state);
    assert_eq!(entered, vec![Phase::Decode, Phase::Execute, Phase::Writeback]);
    assert_eq!(cycle.outcome().unwrap().description, Some("[0x1000] = AX"));
}

#[test]
fn instant_pacing_finishes_on_a_zero_tick() {
    let mut state = CpuState::new();
    let mut cycle = Cycle::start(Instruction::Cmp, &state, Pacing::instant());
    cycle.tick(Duration::ZERO, &mut state);
    assert!(cycle.is_done());
    assert_eq!(cycle.outcome().unwrap().description, None);
    assert_eq!(state.program_counter(), 1);
}

#[test]
fn finished_cycle_never_reapplies() {
    let mut state = CpuState::new();
    state.set_register(Register::Bx, 5);
    let mut cycle = Cycle::start(Instruction::Add, &state, Pacing::instant());
    cycle.tick(Duration::ZERO, &mut state);
    assert!(cycle.tick(Duration::from_secs(5), &mut state).is_empty());
    assert_eq!(state.register(Register::Ax), 5);
    assert_eq!(state.program_counter(), 1);
}

#[test]
fn phase_texts() {
    assert_eq!(Phase::Fetch.status(), Some("Fetching instruction from memory..."));
    assert_eq!(Phase::Writeback.status(), None);
    assert_eq!(Phase::Writeback.summary(), "Update registers/memory");
    let names: Vec<_> = Phase::ALL.iter().map(|p| p.name()).collect();
    assert_eq!(names, ["Fetch", "Decode", "Execute", "Writeback"]);
}

proptest! {
    #[test]
    fn result_is_independent_of_tick_size(
        ins in prop::sample::select(Instruction::ALL.to_vec()),
        ax in any::<i64>(),
        bx in any::<i64>(),
        step_ms in 1u64..700,
    ) {
        let mut state = CpuState::new();
        state.set_register(Register::Ax, ax);
        state.set_register(Register::Bx, bx);
        let expected = apply(ins, state);

        let mut cycle = Cycle::start(ins, &state, Pacing::default());
        let mut ticks = 0;
        while !cycle.is_done() {
            cycle.tick(Duration::from_millis(step_ms), &mut state);
            ticks += 1;
            prop_assert!(ticks <= 2500);
        }
        prop_assert_eq!(state, expected.state);
        prop_assert_eq!(cycle.outcome().unwrap().description, expected.description);
    }
}
