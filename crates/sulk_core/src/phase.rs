//! Turn structure.
//!
//! A turn runs through four phases in a fixed cycle:
//!
//! ```text
//! ClockAndCP -> MarineAction -> StealerAction -> EndPhase -> ClockAndCP ...
//! ```
//!
//! Leaving [`Phase::EndPhase`] advances the turn counter. The cycle never
//! terminates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::Side;

/// One stage of a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Timer and command point housekeeping.
    ClockAndCp,
    /// Marine player acts.
    MarineAction,
    /// Stealer player acts.
    StealerAction,
    /// End of turn.
    EndPhase,
}

impl Phase {
    /// Phases in turn order.
    pub const ALL: [Self; 4] = [
        Self::ClockAndCp,
        Self::MarineAction,
        Self::StealerAction,
        Self::EndPhase,
    ];

    /// Human-readable phase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClockAndCp => "ClockAndCP",
            Self::MarineAction => "MarineAction",
            Self::StealerAction => "StealerAction",
            Self::EndPhase => "EndPhase",
        }
    }

    /// The phase that follows this one. Never `self`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::ClockAndCp => Self::MarineAction,
            Self::MarineAction => Self::StealerAction,
            Self::StealerAction => Self::EndPhase,
            Self::EndPhase => Self::ClockAndCp,
        }
    }

    /// True if leaving this phase starts a new turn.
    #[must_use]
    pub const fn ends_turn(self) -> bool {
        matches!(self, Self::EndPhase)
    }

    /// The side whose pieces act during this phase.
    #[must_use]
    pub const fn acting_side(self) -> Option<Side> {
        match self {
            Self::MarineAction => Some(Side::Marines),
            Self::StealerAction => Some(Side::Stealers),
            Self::ClockAndCp | Self::EndPhase => None,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::ClockAndCp
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that happened while the cycle advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleEvent {
    /// A phase became current.
    PhaseEntered {
        /// The new phase.
        phase: Phase,
        /// Turn number at the time of entry.
        turn: u32,
    },
    /// The turn counter was incremented.
    TurnAdvanced {
        /// The new turn number.
        turn: u32,
    },
}

/// The turn/phase state machine for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameCycle {
    phase: Phase,
    turn_number: u32,
    events: Vec<CycleEvent>,
}

impl GameCycle {
    /// Start a game at turn 1 in [`Phase::ClockAndCp`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_phase(Phase::ClockAndCp)
    }

    /// Start a game at turn 1 in `initial`.
    #[must_use]
    pub fn with_phase(initial: Phase) -> Self {
        let mut cycle = Self {
            phase: initial,
            turn_number: 1,
            events: Vec::new(),
        };
        cycle.on_enter();
        cycle
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current turn, starting at 1.
    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Advance exactly one phase and return the new one.
    ///
    /// Events left over from the previous step are discarded.
    pub fn step(&mut self) -> Phase {
        self.events.clear();
        let leaving = self.phase;
        if leaving.ends_turn() {
            self.turn_number += 1;
            self.events.push(CycleEvent::TurnAdvanced {
                turn: self.turn_number,
            });
        }
        self.phase = leaving.next();
        self.on_enter();
        self.phase
    }

    /// Events recorded by the most recent step (or by construction, before
    /// the first step) that have not been drained yet.
    #[must_use]
    pub fn events(&self) -> &[CycleEvent] {
        &self.events
    }

    /// Take the pending events; see [`GameCycle::events`].
    pub fn drain_events(&mut self) -> Vec<CycleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Runs once each time a phase becomes current.
    fn on_enter(&mut self) {
        tracing::debug!(
            phase = self.phase.name(),
            turn = self.turn_number,
            "Entering phase"
        );
        self.events.push(CycleEvent::PhaseEntered {
            phase: self.phase,
            turn: self.turn_number,
        });
    }
}

impl Default for GameCycle {
    fn default() -> Self {
        Self::new()
    }
}
