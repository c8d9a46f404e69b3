//! Game state facade tying a board, its pieces and the turn cycle together.
//!
//! # Example
//!
//! ```
//! use sulk_core::coord::Coord;
//! use sulk_core::direction::Facing;
//! use sulk_core::engine::GameEngine;
//! use sulk_core::board::Board;
//! use sulk_core::piece::PieceKind;
//! use sulk_core::phase::Phase;
//!
//! let mut engine = GameEngine::new(Board::new(5, 5));
//! let marine = engine
//!     .spawn_piece(PieceKind::StormBolterMarine, Coord::new(2, 2), Facing::North)
//!     .unwrap();
//!
//! assert!(engine.move_piece(marine, Coord::new(2, 1)));
//! assert_eq!(engine.advance_phase(), Phase::MarineAction);
//! ```

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::coord::Coord;
use crate::direction::{Facing, Turn};
use crate::error::Result;
use crate::mission::CompiledMission;
use crate::phase::{CycleEvent, GameCycle, Phase};
use crate::piece::{Piece, PieceKind, Side};

/// Handle to a piece owned by a [`GameEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u32);

impl PieceId {
    /// Raw numeric value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Complete rules state of one game.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    cycle: GameCycle,
    pieces: Vec<Piece>,
}

impl GameEngine {
    /// Start a game on `board` with no pieces.
    #[must_use]
    pub fn new(board: Board) -> Self {
        let mut cycle = GameCycle::new();
        // Nothing to reset before any piece exists.
        cycle.drain_events();
        Self {
            board,
            cycle,
            pieces: Vec::new(),
        }
    }

    /// Start a game on a fresh board built from `mission`.
    pub fn from_mission(mission: &CompiledMission) -> Result<Self> {
        let board = mission.build_board()?;
        tracing::info!(mission = mission.name(), "Starting game");
        Ok(Self::new(board))
    }

    /// The board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, e.g. for opening doors.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The turn cycle.
    #[must_use]
    pub const fn cycle(&self) -> &GameCycle {
        &self.cycle
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.cycle.phase()
    }

    /// Place a new piece. Returns `None` if `position` is off the board or
    /// blocked.
    pub fn spawn_piece(
        &mut self,
        kind: PieceKind,
        position: Coord,
        facing: Facing,
    ) -> Option<PieceId> {
        let piece = Piece::place(&self.board, kind, position, facing)?;
        let id = PieceId(u32::try_from(self.pieces.len()).ok()?);
        tracing::debug!(id = id.0, ?kind, %position, ?facing, "Piece spawned");
        self.pieces.push(piece);
        Some(id)
    }

    /// Look up a piece.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0 as usize)
    }

    /// Mutable access to a piece, e.g. to act on it directly with
    /// [`GameEngine::board`].
    #[must_use]
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(id.0 as usize)
    }

    /// All pieces with their handles, in spawn order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, p)| (PieceId(i as u32), p))
    }

    /// Move a piece; see [`Piece::move_to`]. Unknown ids fail.
    pub fn move_piece(&mut self, id: PieceId, dest: Coord) -> bool {
        match self.pieces.get_mut(id.0 as usize) {
            Some(piece) => piece.move_to(&self.board, dest),
            None => false,
        }
    }

    /// Turn a piece; see [`Piece::turn`]. Unknown ids fail.
    pub fn turn_piece(&mut self, id: PieceId, turn: Turn) -> bool {
        match self.pieces.get_mut(id.0 as usize) {
            Some(piece) => piece.turn(turn),
            None => false,
        }
    }

    /// Advance the turn cycle by one phase.
    ///
    /// Entering a side's action phase restores that side's AP.
    pub fn advance_phase(&mut self) -> Phase {
        let phase = self.cycle.step();
        for event in self.cycle.drain_events() {
            if let CycleEvent::PhaseEntered { phase, .. } = event {
                if let Some(side) = phase.acting_side() {
                    self.reset_side(side);
                }
            }
        }
        phase
    }

    fn reset_side(&mut self, side: Side) {
        let mut count = 0usize;
        for piece in self.pieces.iter_mut().filter(|p| p.side() == side) {
            piece.reset_ap();
            count += 1;
        }
        tracing::debug!(?side, pieces = count, "Action points reset");
    }
}
