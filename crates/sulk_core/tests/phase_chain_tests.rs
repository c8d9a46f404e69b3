//! Turn-phase chain.

use sulk_core::phase::{GameCycle, Phase};

/// Phase names after each of `steps` steps, starting with the initial phase.
fn phase_sequence(steps: usize) -> Vec<&'static str> {
    let mut cycle = GameCycle::new();
    let mut seq = vec![cycle.phase().name()];
    for _ in 0..steps {
        seq.push(cycle.step().name());
    }
    seq
}

#[test]
fn test_follows_clock_marine_stealer_end_pattern() {
    assert_eq!(
        phase_sequence(4),
        vec![
            "ClockAndCP",
            "MarineAction",
            "StealerAction",
            "EndPhase",
            "ClockAndCP"
        ]
    );
}

#[test]
fn test_turn_counter_increments_after_end_phase() {
    let mut cycle = GameCycle::new();
    assert_eq!(cycle.turn_number(), 1);
    cycle.step();
    cycle.step();
    cycle.step();
    assert_eq!(cycle.phase(), Phase::EndPhase);
    assert_eq!(cycle.turn_number(), 1);
    cycle.step();
    assert_eq!(cycle.turn_number(), 2);
}

#[test]
fn test_two_full_cycles() {
    let seq = phase_sequence(8);
    assert_eq!(seq[0], "ClockAndCP");
    assert_eq!(seq[4], "ClockAndCP");
    assert_eq!(seq[8], "ClockAndCP");
}
