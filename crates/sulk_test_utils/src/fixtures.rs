//! Test fixtures and helpers.
//!
//! Pre-built boards, pieces and mission sources for consistent testing.

use std::path::PathBuf;

use serde_json::json;
use sulk_core::board::Board;
use sulk_core::coord::Coord;
use sulk_core::direction::Facing;
use sulk_core::feature::{Blocker, Door};
use sulk_core::piece::Piece;

/// Shorthand for [`Coord::new`].
#[must_use]
pub const fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

/// An empty `width x height` board.
#[must_use]
pub fn empty_board(width: u32, height: u32) -> Board {
    Board::new(width, height)
}

/// A board with a wall on each of `walls`.
#[must_use]
pub fn board_with_walls(width: u32, height: u32, walls: &[Coord]) -> Board {
    let mut board = Board::new(width, height);
    for wall in walls {
        board.add_feature(*wall, Blocker::WALL);
    }
    board
}

/// A board with a closed door on `at`.
#[must_use]
pub fn board_with_door(width: u32, height: u32, at: Coord, facing: Facing) -> Board {
    let mut board = Board::new(width, height);
    board.add_feature(at, Door::new(facing));
    board
}

/// A storm bolter marine with full AP.
#[must_use]
pub const fn marine_at(x: i32, y: i32, facing: Facing) -> Piece {
    Piece::storm_bolter_marine(Coord::new(x, y), facing)
}

/// A genestealer with full AP.
#[must_use]
pub const fn stealer_at(x: i32, y: i32, facing: Facing) -> Piece {
    Piece::genestealer(Coord::new(x, y), facing)
}

/// Mission JSON listing every square of a `width x height` corridor board.
#[must_use]
pub fn corridor_mission_json(name: &str, width: u32, height: u32) -> String {
    let squares: Vec<_> = (0..height)
        .flat_map(|y| (0..width).map(move |x| json!({ "x": x, "y": y, "kind": "corridor" })))
        .collect();
    json!({
        "name": name,
        "width": width,
        "height": height,
        "squares": squares,
    })
    .to_string()
}

/// Directory holding the bundled mission files.
#[must_use]
pub fn missions_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("sulk_core")
        .join("assets")
        .join("missions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sulk_core::mission::MissionData;

    #[test]
    fn test_corridor_mission_json_compiles() {
        let json = corridor_mission_json("Grid", 3, 2);
        let mission = MissionData::from_json_str(&json).unwrap().compile().unwrap();
        assert_eq!(mission.squares().len(), 6);
        assert_eq!((mission.width(), mission.height()), (3, 2));
    }

    #[test]
    fn test_board_fixtures() {
        let board = board_with_walls(3, 3, &[c(1, 1)]);
        assert!(!board.is_passable(c(1, 1)));
        let board = board_with_door(3, 3, c(0, 1), Facing::East);
        assert!(board.square(c(0, 1)).unwrap().door().is_some());
    }

    #[test]
    fn test_missions_dir_exists() {
        assert!(missions_dir().join("demo_board.json").is_file());
    }
}
