//! Scripted piece actions.
//!
//! Runs a sequence of move/turn requests against a piece and checks after
//! every request that the rules held:
//!
//! - An action succeeds exactly when its `can_*` query offered a cost.
//! - A successful action deducts exactly that cost.
//! - A failed action leaves position, facing and AP untouched.
//!
//! Used by the property tests below and by integration tests in other crates.

use sulk_core::board::Board;
use sulk_core::coord::Coord;
use sulk_core::direction::Turn;
use sulk_core::piece::Piece;

/// A single request a client might send for a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move to the square at this offset from the piece.
    Step(i32, i32),
    /// Move to this absolute square, however far away.
    MoveTo(Coord),
    /// Rotate.
    Turn(Turn),
    /// Step straight ahead.
    Forward,
    /// Step straight back.
    Backward,
}

impl Action {
    /// Destination square for movement actions.
    #[must_use]
    pub fn destination(self, piece: &Piece) -> Option<Coord> {
        match self {
            Self::Step(dx, dy) => Some(piece.position().offset(dx, dy)),
            Self::MoveTo(dest) => Some(dest),
            Self::Forward => Some(piece.ahead()),
            Self::Backward => Some(piece.behind()),
            Self::Turn(_) => None,
        }
    }

    /// Cost the piece's query methods quote for this action.
    #[must_use]
    pub fn quoted_cost(self, piece: &Piece, board: &Board) -> Option<u8> {
        match self {
            Self::Turn(turn) => piece.can_turn(turn),
            _ => self
                .destination(piece)
                .and_then(|dest| piece.can_move(board, dest)),
        }
    }

    /// Perform the action.
    pub fn apply(self, piece: &mut Piece, board: &Board) -> bool {
        match self {
            Self::Step(dx, dy) => {
                let dest = piece.position().offset(dx, dy);
                piece.move_to(board, dest)
            }
            Self::MoveTo(dest) => piece.move_to(board, dest),
            Self::Turn(turn) => piece.turn(turn),
            Self::Forward => piece.move_forward(board),
            Self::Backward => piece.move_backward(board),
        }
    }
}

/// Outcome of running a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptResult {
    /// Actions attempted.
    pub attempted: usize,
    /// Actions that succeeded.
    pub succeeded: usize,
    /// Total AP spent.
    pub ap_spent: u32,
    /// Human-readable rule violations, empty when all rules held.
    pub violations: Vec<String>,
}

impl ScriptResult {
    /// Whether every action obeyed the rules.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }

    /// Assert that every action obeyed the rules, with a detailed message.
    ///
    /// # Panics
    ///
    /// Panics if any violation was recorded.
    pub fn assert_consistent(&self) {
        if !self.is_consistent() {
            panic!(
                "Piece actions broke the rules!\n\
                 Attempted: {}\n\
                 Succeeded: {}\n\
                 Violations:\n  {}",
                self.attempted,
                self.succeeded,
                self.violations.join("\n  ")
            );
        }
    }
}

/// Run `actions` against `piece` on `board`, checking the rules after each.
pub fn run_script(piece: &mut Piece, board: &Board, actions: &[Action]) -> ScriptResult {
    let mut result = ScriptResult::default();

    for (i, action) in actions.iter().copied().enumerate() {
        let before = piece.clone();
        let quoted = action.quoted_cost(&before, board);
        let ok = action.apply(piece, board);
        result.attempted += 1;

        match (quoted, ok) {
            (Some(cost), true) => {
                result.succeeded += 1;
                result.ap_spent += u32::from(cost);
                if piece.ap() + cost != before.ap() {
                    result.violations.push(format!(
                        "#{i} {action:?}: AP went {} -> {} but cost was {cost}",
                        before.ap(),
                        piece.ap()
                    ));
                }
                if let Some(dest) = action.destination(&before) {
                    if piece.position() != dest {
                        result.violations.push(format!(
                            "#{i} {action:?}: ended at {} instead of {dest}",
                            piece.position()
                        ));
                    }
                }
            }
            (None, false) => {
                if *piece != before {
                    result.violations.push(format!(
                        "#{i} {action:?}: failed but changed state {before:?} -> {piece:?}"
                    ));
                }
            }
            (quoted, ok) => result.violations.push(format!(
                "#{i} {action:?}: quoted {quoted:?} but apply returned {ok}"
            )),
        }
    }

    result
}

/// Proptest strategies for rules testing.
pub mod strategies {
    use proptest::prelude::*;
    use sulk_core::coord::Coord;
    use sulk_core::direction::{Facing, Turn};

    use super::Action;

    /// Any facing.
    pub fn arb_facing() -> impl Strategy<Value = Facing> {
        prop::sample::select(Facing::ALL.to_vec())
    }

    /// Any turn, including the no-op.
    pub fn arb_turn() -> impl Strategy<Value = Turn> {
        prop::sample::select(vec![Turn::None, Turn::Right, Turn::About, Turn::Left])
    }

    /// Small board dimensions (1 to 12 per side).
    pub fn arb_board_dims() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=12, 1u32..=12)
    }

    /// A coordinate that may fall up to `margin` squares off a board.
    pub fn arb_coord_near(width: u32, height: u32, margin: i32) -> impl Strategy<Value = Coord> {
        let w = width as i32;
        let h = height as i32;
        (-margin..w + margin, -margin..h + margin).prop_map(|(x, y)| Coord::new(x, y))
    }

    /// A coordinate on a `width x height` board.
    pub fn arb_coord_within(width: u32, height: u32) -> impl Strategy<Value = Coord> {
        arb_coord_near(width, height, 0)
    }

    /// Any coordinate at all, biased towards the corners of the `i32` range.
    pub fn arb_far_coord() -> impl Strategy<Value = Coord> {
        let edge = prop::sample::select(vec![i32::MIN, i32::MIN + 1, -1, 0, i32::MAX - 1, i32::MAX]);
        prop_oneof![
            (edge.clone(), edge).prop_map(|(x, y)| Coord::new(x, y)),
            any::<(i32, i32)>().prop_map(Coord::from),
        ]
    }

    /// Any action, with targets that are sometimes not adjacent or far off
    /// the board.
    pub fn arb_action() -> impl Strategy<Value = Action> {
        prop_oneof![
            4 => (-1i32..=1, -1i32..=1).prop_map(|(dx, dy)| Action::Step(dx, dy)),
            1 => (-3i32..=3, -3i32..=3).prop_map(|(dx, dy)| Action::Step(dx, dy)),
            1 => arb_far_coord().prop_map(Action::MoveTo),
            2 => arb_turn().prop_map(Action::Turn),
            2 => Just(Action::Forward),
            1 => Just(Action::Backward),
        ]
    }

    /// A sequence of actions.
    pub fn arb_action_sequence(max_len: usize) -> impl Strategy<Value = Vec<Action>> {
        proptest::collection::vec(arb_action(), 0..max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::strategies::*;
    use super::*;
    use crate::fixtures::{board_with_door, board_with_walls, c, empty_board, marine_at};
    use proptest::prelude::*;
    use sulk_core::costs::AP_PER_TURN;
    use sulk_core::direction::Facing;
    use sulk_core::los::has_line_of_sight;
    use sulk_core::phase::{GameCycle, Phase};

    // =========================================================================
    // Scripted scenarios
    // =========================================================================

    #[test]
    fn test_script_forward_then_about_face() {
        let board = empty_board(5, 5);
        let mut piece = marine_at(2, 2, Facing::North);

        let result = run_script(
            &mut piece,
            &board,
            &[Action::Step(0, -1), Action::Turn(Turn::About)],
        );

        result.assert_consistent();
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.ap_spent, 3);
        assert_eq!(piece.ap(), 1);
        assert_eq!(piece.position(), c(2, 1));
        assert_eq!(piece.facing(), Facing::South);
    }

    #[test]
    fn test_script_failures_are_noops() {
        let board = board_with_door(5, 5, c(2, 1), Facing::North);
        let mut piece = marine_at(2, 2, Facing::North);

        let result = run_script(
            &mut piece,
            &board,
            &[
                Action::Forward,
                Action::Step(2, 0),
                Action::Step(0, 0),
                Action::Turn(Turn::About),
                Action::Turn(Turn::About),
                Action::Turn(Turn::Right),
            ],
        );

        result.assert_consistent();
        assert_eq!(result.succeeded, 2);
        assert_eq!(piece.ap(), 0);
        assert_eq!(piece.position(), c(2, 2));
    }

    #[test]
    fn test_script_far_targets_are_refused() {
        let board = empty_board(5, 5);
        let mut piece = marine_at(2, 2, Facing::North);

        let result = run_script(
            &mut piece,
            &board,
            &[
                Action::MoveTo(c(i32::MIN, 0)),
                Action::MoveTo(c(i32::MAX, i32::MIN)),
                Action::Step(i32::MIN, i32::MAX),
                Action::MoveTo(c(2, 1)),
            ],
        );

        result.assert_consistent();
        assert_eq!(result.succeeded, 1);
        assert_eq!(piece.position(), c(2, 1));
    }

    #[test]
    fn test_inconsistency_is_reported() {
        let result = ScriptResult {
            attempted: 1,
            succeeded: 1,
            ap_spent: 1,
            violations: vec!["#0 Forward: quoted None but apply returned true".into()],
        };
        assert!(!result.is_consistent());
        let panicked = std::panic::catch_unwind(|| result.assert_consistent());
        assert!(panicked.is_err());
    }

    // =========================================================================
    // Property-based tests using proptest
    // =========================================================================

    proptest! {
        /// Whatever a client asks for, the rules hold after every request.
        #[test]
        fn prop_piece_actions_follow_the_rules(
            facing in arb_facing(),
            actions in arb_action_sequence(24),
            walls in proptest::collection::vec(arb_coord_within(6, 6), 0..8),
        ) {
            let board = board_with_walls(6, 6, &walls);
            let start = c(3, 3);
            prop_assume!(board.is_passable(start));
            let mut piece = marine_at(start.x, start.y, facing);

            let result = run_script(&mut piece, &board, &actions);
            prop_assert!(result.is_consistent(), "{:?}", result.violations);
            prop_assert!(result.ap_spent <= u32::from(AP_PER_TURN));
            prop_assert!(board.is_passable(piece.position()));
        }

        /// On-board lookups return the right square; off-board lookups return nothing.
        #[test]
        fn prop_get_square_respects_bounds(
            (w, h) in arb_board_dims(),
            x in -3i32..15,
            y in -3i32..15,
        ) {
            let board = empty_board(w, h);
            let on_board = x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h;
            match board.get(x, y) {
                Some(square) => {
                    prop_assert!(on_board);
                    prop_assert_eq!(square.coord(), c(x, y));
                }
                None => prop_assert!(!on_board),
            }
            prop_assert_eq!(board.all_squares().len(), (w * h) as usize);
        }

        /// Neighbourhoods are small, exclude the square itself and stay on the board.
        #[test]
        fn prop_adjacents_are_well_formed(
            (w, h) in arb_board_dims(),
            seed in (0u32..144, 0u32..144),
        ) {
            let board = empty_board(w, h);
            let coord = c((seed.0 % w) as i32, (seed.1 % h) as i32);

            let first = board.adjacents_of(coord).to_vec();
            prop_assert!(first.len() <= 8);
            prop_assert!(!first.contains(&coord));
            for n in &first {
                prop_assert!(board.in_bounds(*n));
                prop_assert!(coord.is_adjacent(*n));
            }
            prop_assert_eq!(board.adjacents_of(coord), first.as_slice());
        }

        /// Every square can see itself, even a walled one.
        #[test]
        fn prop_los_is_reflexive(
            coord in arb_coord_within(8, 8),
            walls in proptest::collection::vec(arb_coord_within(8, 8), 0..20),
        ) {
            let board = board_with_walls(8, 8, &walls);
            prop_assert!(has_line_of_sight(&board, coord, coord));
        }

        /// Neighbours always see each other: there is nothing in between.
        #[test]
        fn prop_los_to_neighbours_is_clear(
            coord in arb_coord_within(8, 8),
            walls in proptest::collection::vec(arb_coord_within(8, 8), 0..20),
        ) {
            let board = board_with_walls(8, 8, &walls);
            for n in board.adjacents_of(coord) {
                prop_assert!(has_line_of_sight(&board, coord, *n));
            }
        }

        /// Sight and distance queries accept any pair of coordinates.
        #[test]
        fn prop_far_coordinates_are_harmless(
            a in arb_far_coord(),
            b in arb_far_coord(),
        ) {
            let board = empty_board(6, 6);
            let on_board = board.in_bounds(a) && board.in_bounds(b);
            prop_assert_eq!(has_line_of_sight(&board, a, b), on_board);
            prop_assert_eq!(a.distance(b), b.distance(a));
            prop_assert_eq!(a.is_adjacent(b), a.distance(b) == 1);
        }

        /// After 4k steps the cycle is back at ClockAndCP on turn k + 1.
        #[test]
        fn prop_cycle_has_period_four(turns in 0u32..50, extra in 0u32..4) {
            let mut cycle = GameCycle::new();
            for _ in 0..(turns * 4) {
                cycle.step();
            }
            prop_assert_eq!(cycle.phase(), Phase::ClockAndCp);
            prop_assert_eq!(cycle.turn_number(), turns + 1);

            for _ in 0..extra {
                cycle.step();
            }
            prop_assert_eq!(cycle.phase(), Phase::ALL[extra as usize]);
            prop_assert_eq!(cycle.turn_number(), turns + 1);
        }
    }
}
