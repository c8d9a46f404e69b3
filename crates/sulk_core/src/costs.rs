//! Action point cost tables.

use crate::direction::{Heading, Turn};

/// Action points a piece receives each turn; also the value AP resets to.
pub const AP_PER_TURN: u8 = 4;

/// AP cost of stepping to an adjacent square in `heading`.
///
/// Forward and forward diagonals cost 1; side-steps and anything backwards cost 2.
#[must_use]
pub const fn move_cost(heading: Heading) -> u8 {
    match heading {
        Heading::Forward | Heading::ForwardLeft | Heading::ForwardRight => 1,
        Heading::Right
        | Heading::Left
        | Heading::Back
        | Heading::BackLeft
        | Heading::BackRight => 2,
    }
}

/// AP cost of a turn.
#[must_use]
pub const fn turn_cost(turn: Turn) -> u8 {
    match turn {
        Turn::None => 0,
        Turn::Left | Turn::Right => 1,
        Turn::About => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_costs() {
        let cheap: Vec<_> = Heading::ALL
            .into_iter()
            .filter(|h| move_cost(*h) == 1)
            .collect();
        assert_eq!(
            cheap,
            vec![Heading::Forward, Heading::ForwardRight, Heading::ForwardLeft]
        );
        assert_eq!(move_cost(Heading::Back), 2);
        assert_eq!(move_cost(Heading::Left), 2);
    }

    #[test]
    fn test_turn_costs() {
        assert_eq!(turn_cost(Turn::None), 0);
        assert_eq!(turn_cost(Turn::Left), 1);
        assert_eq!(turn_cost(Turn::Right), 1);
        assert_eq!(turn_cost(Turn::About), 2);
    }
}
