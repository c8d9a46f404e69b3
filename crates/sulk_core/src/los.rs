//! Line of sight between squares.
//!
//! Sight is traced between square centres. Orthogonal and exact 45° lines
//! step one square at a time along each axis; every other ("oblique") line is
//! sampled at `max(|dx|, |dy|) + 1` evenly spaced points, each rounded to the
//! nearest square. The two strategies are deliberately kept separate.
//!
//! Sampling uses exact integer arithmetic (ties round towards positive
//! infinity), so results never depend on floating-point behaviour.
//!
//! The endpoints never block: a piece standing on a door square can still be
//! seen. Only intermediate squares are checked.

use crate::board::Board;
use crate::coord::Coord;

/// Returns `true` if nothing between `a` and `b` blocks sight.
///
/// A square can always see itself. Coordinates off the board neither see
/// nor are seen.
///
/// # Example
///
/// ```
/// use sulk_core::board::Board;
/// use sulk_core::coord::Coord;
/// use sulk_core::feature::Blocker;
/// use sulk_core::los::has_line_of_sight;
///
/// let mut board = Board::new(5, 5);
/// assert!(has_line_of_sight(&board, Coord::new(2, 2), Coord::new(2, 0)));
///
/// board.add_feature(Coord::new(2, 1), Blocker::WALL);
/// assert!(!has_line_of_sight(&board, Coord::new(2, 2), Coord::new(2, 0)));
/// ```
#[must_use]
pub fn has_line_of_sight(board: &Board, a: Coord, b: Coord) -> bool {
    if !board.in_bounds(a) || !board.in_bounds(b) {
        return false;
    }
    if a == b {
        return true;
    }

    let points = trace_line(a, b);
    let blocked = intermediate(&points).iter().find(|c| board.blocks_los(**c));

    match blocked {
        Some(coord) => {
            tracing::trace!(from = %a, to = %b, blocker = %coord, "Line of sight blocked");
            false
        }
        None => true,
    }
}

/// Every square touched by the line from `a` to `b`, endpoints included.
///
/// Returns one entry per step, so the result grows with the distance.
#[must_use]
pub fn trace_line(a: Coord, b: Coord) -> Vec<Coord> {
    let (dx, dy) = a.delta_to(b);
    if is_oblique(dx, dy) {
        sample_oblique(a, dx, dy)
    } else {
        step_straight(a, b, dx, dy)
    }
}

/// True unless the displacement is orthogonal, exactly diagonal or zero.
#[must_use]
pub fn is_oblique(dx: i64, dy: i64) -> bool {
    dx != 0 && dy != 0 && dx.unsigned_abs() != dy.unsigned_abs()
}

fn intermediate(points: &[Coord]) -> &[Coord] {
    if points.len() <= 2 {
        &[]
    } else {
        &points[1..points.len() - 1]
    }
}

const MAX_PREALLOCATED: usize = 256;

/// Preallocation for a trace of `steps` steps.
fn capacity_hint(steps: u64) -> usize {
    usize::try_from(steps.saturating_add(1))
        .map_or(MAX_PREALLOCATED, |n| n.min(MAX_PREALLOCATED))
}

fn step_straight(a: Coord, b: Coord, dx: i64, dy: i64) -> Vec<Coord> {
    // Both signs are in -1..=1.
    let (sx, sy) = (dx.signum() as i32, dy.signum() as i32);
    let steps = dx.unsigned_abs().max(dy.unsigned_abs());
    let mut points = Vec::with_capacity(capacity_hint(steps));

    let mut current = a;
    points.push(current);
    while current != b {
        current = current.offset(sx, sy);
        points.push(current);
    }
    points
}

fn sample_oblique(a: Coord, dx: i64, dy: i64) -> Vec<Coord> {
    let steps = dx.unsigned_abs().max(dy.unsigned_abs());
    let mut points: Vec<Coord> = Vec::with_capacity(capacity_hint(steps));
    let den = i128::from(steps);

    for i in 0..=den {
        let x = i128::from(a.x) + round_ratio(i * i128::from(dx), den);
        let y = i128::from(a.y) + round_ratio(i * i128::from(dy), den);
        // Both lie between the endpoints, so they fit back into i32.
        let point = Coord::new(x as i32, y as i32);
        if points.last() != Some(&point) {
            points.push(point);
        }
    }
    points
}

/// `num / den` rounded to the nearest integer, halves towards +inf. `den > 0`.
#[inline]
fn round_ratio(num: i128, den: i128) -> i128 {
    (2 * num + den).div_euclid(2 * den)
}
