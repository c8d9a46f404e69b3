//! Pieces and their action point economy.
//!
//! A piece never owns the board it stands on: every query and action takes
//! the board by reference. Actions are all-or-nothing. A rejected move or
//! turn leaves position, facing and AP exactly as they were.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::coord::Coord;
use crate::costs::{move_cost, turn_cost, AP_PER_TURN};
use crate::direction::{Facing, Heading, Turn};
use crate::square::Square;

/// Which player a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Terminator squad.
    Marines,
    /// Genestealer brood.
    Stealers,
}

/// Concrete piece types. Behaviour is shared; only identity differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// Terminator armed with a storm bolter.
    StormBolterMarine,
    /// Genestealer.
    Genestealer,
}

impl PieceKind {
    /// Texture key used by the render layer.
    #[must_use]
    pub const fn sprite_key(self) -> &'static str {
        match self {
            Self::StormBolterMarine => "terminator_storm_bolter",
            Self::Genestealer => "genestealer",
        }
    }

    /// Owning side.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::StormBolterMarine => Side::Marines,
            Self::Genestealer => Side::Stealers,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StormBolterMarine => "Storm Bolter Marine",
            Self::Genestealer => "Genestealer",
        })
    }
}

/// Why an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The piece has no action points left.
    #[error("no action points left")]
    Exhausted,
    /// Destination is not one of the eight neighbouring squares.
    #[error("destination is not adjacent")]
    NotAdjacent,
    /// Destination is off the board.
    #[error("destination is off the board")]
    OffBoard,
    /// A feature on the destination forbids entry.
    #[error("destination is blocked")]
    Blocked,
    /// The action costs more AP than remain.
    #[error("needs {cost} AP, {available} left")]
    InsufficientAp {
        /// AP the action would cost.
        cost: u8,
        /// AP remaining.
        available: u8,
    },
}

/// An actor on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    kind: PieceKind,
    position: Coord,
    facing: Facing,
    ap: u8,
}

impl Piece {
    /// Create a piece with a full AP allotment.
    ///
    /// The start square is not checked: it may be off the board or blocked.
    /// Use [`Piece::place`] (or [`GameEngine::spawn_piece`]) to put a piece on
    /// a real board.
    ///
    /// [`GameEngine::spawn_piece`]: crate::engine::GameEngine::spawn_piece
    #[must_use]
    pub const fn new(kind: PieceKind, position: Coord, facing: Facing) -> Self {
        Self {
            kind,
            position,
            facing,
            ap: AP_PER_TURN,
        }
    }

    /// Create a piece on `board`, refusing off-board or blocked squares.
    #[must_use]
    pub fn place(board: &Board, kind: PieceKind, position: Coord, facing: Facing) -> Option<Self> {
        board
            .is_passable(position)
            .then(|| Self::new(kind, position, facing))
    }

    /// Storm bolter terminator. Unchecked, like [`Piece::new`].
    #[must_use]
    pub const fn storm_bolter_marine(position: Coord, facing: Facing) -> Self {
        Self::new(PieceKind::StormBolterMarine, position, facing)
    }

    /// Genestealer. Unchecked, like [`Piece::new`].
    #[must_use]
    pub const fn genestealer(position: Coord, facing: Facing) -> Self {
        Self::new(PieceKind::Genestealer, position, facing)
    }

    /// Same piece with `ap` remaining, capped at [`AP_PER_TURN`].
    #[must_use]
    pub fn with_ap(mut self, ap: u8) -> Self {
        self.ap = ap.min(AP_PER_TURN);
        self
    }

    /// Piece type.
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Owning side.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.kind.side()
    }

    /// Current square coordinate.
    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// Current facing.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Remaining action points.
    #[must_use]
    pub const fn ap(&self) -> u8 {
        self.ap
    }

    /// Restore the full AP allotment.
    pub fn reset_ap(&mut self) {
        self.ap = AP_PER_TURN;
    }

    /// The square the piece stands on.
    #[must_use]
    pub fn square<'b>(&self, board: &'b Board) -> Option<&'b Square> {
        board.square(self.position)
    }

    /// Heading of `dest` relative to the piece's facing.
    #[must_use]
    pub fn heading_to(&self, dest: Coord) -> Option<Heading> {
        Heading::between(self.position, dest, self.facing)
    }

    /// Why a move to `dest` would fail, or its AP cost.
    pub fn check_move(&self, board: &Board, dest: Coord) -> Result<u8, Rejection> {
        if self.ap == 0 {
            return Err(Rejection::Exhausted);
        }
        let heading = self.heading_to(dest).ok_or(Rejection::NotAdjacent)?;
        let square = board.square(dest).ok_or(Rejection::OffBoard)?;
        if square.blocks_move() {
            return Err(Rejection::Blocked);
        }
        self.affordable(move_cost(heading))
    }

    /// AP cost of moving to `dest`, or `None` if the move is illegal.
    #[must_use]
    pub fn can_move(&self, board: &Board, dest: Coord) -> Option<u8> {
        self.check_move(board, dest).ok()
    }

    /// Move to `dest`, paying its AP cost. Returns `false` and changes
    /// nothing if the move is illegal.
    pub fn move_to(&mut self, board: &Board, dest: Coord) -> bool {
        match self.check_move(board, dest) {
            Ok(cost) => {
                let from = self.position;
                self.ap -= cost;
                self.position = dest;
                tracing::debug!(
                    kind = ?self.kind,
                    %from,
                    to = %dest,
                    cost,
                    ap_left = self.ap,
                    "Piece moved"
                );
                true
            }
            Err(reason) => {
                tracing::trace!(kind = ?self.kind, to = %dest, %reason, "Move rejected");
                false
            }
        }
    }

    /// Why `turn` would fail, or its AP cost.
    pub fn check_turn(&self, turn: Turn) -> Result<u8, Rejection> {
        if self.ap == 0 {
            return Err(Rejection::Exhausted);
        }
        self.affordable(turn_cost(turn))
    }

    /// AP cost of `turn`, or `None` if it cannot be afforded.
    #[must_use]
    pub fn can_turn(&self, turn: Turn) -> Option<u8> {
        self.check_turn(turn).ok()
    }

    /// Rotate by `turn`, paying its AP cost. Returns `false` and changes
    /// nothing if it cannot be afforded.
    pub fn turn(&mut self, turn: Turn) -> bool {
        match self.check_turn(turn) {
            Ok(cost) => {
                self.ap -= cost;
                self.facing = self.facing.turned(turn);
                tracing::debug!(
                    kind = ?self.kind,
                    ?turn,
                    facing = ?self.facing,
                    cost,
                    ap_left = self.ap,
                    "Piece turned"
                );
                true
            }
            Err(reason) => {
                tracing::trace!(kind = ?self.kind, ?turn, %reason, "Turn rejected");
                false
            }
        }
    }

    /// The square directly ahead.
    #[must_use]
    pub const fn ahead(&self) -> Coord {
        self.facing.step(self.position)
    }

    /// The square directly behind.
    #[must_use]
    pub const fn behind(&self) -> Coord {
        self.facing.opposite().step(self.position)
    }

    /// Step one square forward (1 AP).
    pub fn move_forward(&mut self, board: &Board) -> bool {
        self.move_to(board, self.ahead())
    }

    /// Step one square backward without turning (2 AP).
    pub fn move_backward(&mut self, board: &Board) -> bool {
        self.move_to(board, self.behind())
    }

    fn affordable(&self, cost: u8) -> Result<u8, Rejection> {
        if cost <= self.ap {
            Ok(cost)
        } else {
            Err(Rejection::InsufficientAp {
                cost,
                available: self.ap,
            })
        }
    }
}
