//! ASCII board renderer for terminal inspection.
//!
//! One character per square:
//!
//! | Glyph | Meaning |
//! |-------|---------|
//! | `.`   | corridor |
//! | `1`-`9` | room square, by section id |
//! | `r`   | room with another or no section id |
//! | `D` / `/` | closed / open door |
//! | `#`   | wall |
//! | `%`   | impassable, see-through |
//! | `~`   | passable, opaque |
//! | `@`   | line of sight origin |
//! | `x`   | hidden from the origin |

use std::fmt::Write;

use sulk_core::board::Board;
use sulk_core::coord::Coord;
use sulk_core::feature::{FeatureKind, Obstacle};
use sulk_core::los::has_line_of_sight;
use sulk_core::square::{Square, SquareKind};

use crate::error::{Result, ToolError};

/// Rendering configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Overlay line of sight from this square.
    pub los_from: Option<Coord>,
    /// Append a legend and summary line.
    pub legend: bool,
}

/// Glyph for a square, ignoring any overlay.
#[must_use]
pub fn square_glyph(square: &Square) -> char {
    if let Some(feature) = square.features().last() {
        return match feature.kind() {
            FeatureKind::Door(door) if door.is_open() => '/',
            FeatureKind::Door(_) => 'D',
            FeatureKind::Blocker(b) => match (b.blocks_move(), b.blocks_los()) {
                (true, true) => '#',
                (true, false) => '%',
                (false, true) => '~',
                (false, false) => '.',
            },
        };
    }

    match square.kind() {
        SquareKind::Corridor => '.',
        SquareKind::Room => u32::try_from(square.section().as_i32())
            .ok()
            .filter(|id| (1..=9).contains(id))
            .and_then(|id| char::from_digit(id, 10))
            .unwrap_or('r'),
    }
}

/// Render `board` row by row, top row first.
///
/// # Errors
///
/// Returns [`ToolError::OffBoard`] if the line of sight origin is not on the
/// board.
pub fn render_board(board: &Board, options: &RenderOptions) -> Result<String> {
    if let Some(origin) = options.los_from {
        if !board.in_bounds(origin) {
            return Err(ToolError::OffBoard(origin.to_string()));
        }
    }

    let width = board.width() as usize;
    let mut out = String::with_capacity((width + 1) * board.height() as usize);
    let mut hidden = 0usize;

    for (i, square) in board.all_squares().enumerate() {
        let glyph = match options.los_from {
            Some(origin) if origin == square.coord() => '@',
            Some(origin) if !has_line_of_sight(board, origin, square.coord()) => {
                hidden += 1;
                'x'
            }
            _ => square_glyph(square),
        };
        out.push(glyph);
        if (i + 1) % width == 0 {
            out.push('\n');
        }
    }

    if options.legend {
        let _ = writeln!(
            out,
            "{}x{} board, {} sections",
            board.width(),
            board.height(),
            board.sections().len()
        );
        if let Some(origin) = options.los_from {
            let total = board.all_squares().len();
            let _ = writeln!(out, "{} of {} squares visible from {origin}", total - hidden, total);
        }
    }

    Ok(out)
}

/// Parse an `x,y` pair.
///
/// # Errors
///
/// Returns [`ToolError::BadCoord`] if `s` is not two comma separated integers.
pub fn parse_coord(s: &str) -> Result<Coord> {
    let bad = || ToolError::BadCoord(s.to_string());
    let (x, y) = s.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let y = y.trim().parse().map_err(|_| bad())?;
    Ok(Coord::new(x, y))
}
