//! Tile store and board projection
//!
//! The ordered tile list is the authoritative board state; the matrix view
//! is a pure projection recomputed from it. At most one tile occupies any
//! cell at rest - a precondition of `project`, not a runtime check.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// A numbered movable unit on the merge-game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    /// Power-of-two value, always >= 2
    pub value: u32,
    /// Grid cell, both coordinates in [0, size)
    pub pos: IVec2,
    /// Cell before the last slide, kept for animation interpolation
    pub prev: IVec2,
    /// This tile absorbed another one this move
    pub newly_merged: bool,
    /// This tile was spawned after a move, not part of the slide
    pub spawned: bool,
}

impl Tile {
    pub fn new(id: u32, value: u32, pos: IVec2) -> Self {
        Self {
            id,
            value,
            pos,
            prev: pos,
            newly_merged: false,
            spawned: false,
        }
    }
}

/// Uniformly random empty cell, or None when the board is full
fn empty_cell(rng: &mut Pcg32, tiles: &[Tile], size: i32) -> Option<IVec2> {
    let mut empty = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let cell = IVec2::new(x, y);
            if !tiles.iter().any(|t| t.pos == cell) {
                empty.push(cell);
            }
        }
    }
    if empty.is_empty() {
        None
    } else {
        Some(empty[rng.random_range(0..empty.len())])
    }
}

/// New tile value: 2 with probability `1 - four_chance`, else 4
fn spawn_value(rng: &mut Pcg32, four_chance: f64) -> u32 {
    if rng.random_bool(four_chance) { 4 } else { 2 }
}

/// Place exactly two starting tiles in distinct random empty cells
pub fn initialize(rng: &mut Pcg32, size: i32, four_chance: f64, next_id: &mut u32) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(2);
    for _ in 0..2 {
        // A fresh board always has empty cells
        if let Some(cell) = empty_cell(rng, &tiles, size) {
            let id = *next_id;
            *next_id += 1;
            tiles.push(Tile::new(id, spawn_value(rng, four_chance), cell));
        }
    }
    tiles
}

/// Add one spawned tile to a uniformly random empty cell.
///
/// Returns false (and leaves the store unchanged) on a full board.
pub fn add_random_tile(
    tiles: &mut Vec<Tile>,
    rng: &mut Pcg32,
    size: i32,
    four_chance: f64,
    next_id: &mut u32,
) -> bool {
    let Some(cell) = empty_cell(rng, tiles, size) else {
        return false;
    };
    let id = *next_id;
    *next_id += 1;
    let mut tile = Tile::new(id, spawn_value(rng, four_chance), cell);
    tile.spawned = true;
    tiles.push(tile);
    true
}

/// Project the tile store onto a row-major value matrix
pub fn project(tiles: &[Tile], size: i32) -> Vec<Vec<Option<u32>>> {
    let mut board = vec![vec![None; size as usize]; size as usize];
    for tile in tiles {
        board[tile.pos.y as usize][tile.pos.x as usize] = Some(tile.value);
    }
    board
}

/// True iff the board is saturated and no tile has an orthogonal neighbor
/// of equal value
pub fn is_game_over(tiles: &[Tile], size: i32) -> bool {
    if tiles.len() < (size * size) as usize {
        return false;
    }
    tiles.iter().all(|tile| {
        [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y]
            .iter()
            .all(|off| {
                !tiles
                    .iter()
                    .any(|t| t.pos == tile.pos + *off && t.value == tile.value)
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn initialize_places_two_distinct_tiles() {
        let mut rng = rng();
        let mut next_id = 0;
        let tiles = initialize(&mut rng, 4, 0.1, &mut next_id);

        assert_eq!(tiles.len(), 2);
        assert_eq!(next_id, 2);
        assert_ne!(tiles[0].pos, tiles[1].pos);
        for tile in &tiles {
            assert!(tile.value == 2 || tile.value == 4);
            assert!((0..4).contains(&tile.pos.x) && (0..4).contains(&tile.pos.y));
            assert_eq!(tile.prev, tile.pos);
        }
    }

    #[test]
    fn add_random_tile_avoids_occupied_cells() {
        let mut rng = rng();
        let mut next_id = 0;
        // Leave a single free cell at (3, 3)
        let mut tiles = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                if (x, y) != (3, 3) {
                    tiles.push(Tile::new(next_id, 2, IVec2::new(x, y)));
                    next_id += 1;
                }
            }
        }

        assert!(add_random_tile(&mut tiles, &mut rng, 4, 0.1, &mut next_id));
        let spawned = tiles.last().unwrap();
        assert_eq!(spawned.pos, IVec2::new(3, 3));
        assert!(spawned.spawned);

        // Board is now full
        assert!(!add_random_tile(&mut tiles, &mut rng, 4, 0.1, &mut next_id));
        assert_eq!(tiles.len(), 16);
    }

    #[test]
    fn project_maps_tiles_to_cells() {
        let tiles = vec![
            Tile::new(0, 2, IVec2::new(0, 0)),
            Tile::new(1, 8, IVec2::new(3, 1)),
        ];
        let board = project(&tiles, 4);
        assert_eq!(board[0][0], Some(2));
        assert_eq!(board[1][3], Some(8));
        assert_eq!(board[2][2], None);
    }

    /// Saturated board with strictly alternating values in every 2x2 block
    fn checkerboard() -> Vec<Tile> {
        let mut tiles = Vec::new();
        let mut id = 0;
        for y in 0..4 {
            for x in 0..4 {
                let value = if (x + y) % 2 == 0 { 2 } else { 4 };
                tiles.push(Tile::new(id, value, IVec2::new(x, y)));
                id += 1;
            }
        }
        tiles
    }

    #[test]
    fn checkerboard_is_game_over() {
        assert!(is_game_over(&checkerboard(), 4));
    }

    #[test]
    fn equal_neighbors_keep_game_alive() {
        let mut tiles = checkerboard();
        // Make (0,0) and (1,0) an equal orthogonal pair
        tiles[1].value = tiles[0].value;
        assert!(!is_game_over(&tiles, 4));
    }

    #[test]
    fn unsaturated_board_is_not_game_over() {
        let tiles = vec![Tile::new(0, 2, IVec2::new(0, 0))];
        assert!(!is_game_over(&tiles, 4));
    }
}
