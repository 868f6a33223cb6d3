//! Merge step
//!
//! Scans each slid row or column in traversal order and combines
//! consecutive equal-value pairs into one tile of doubled value. Both
//! operands of a merge are consumed, so a tile merged this turn can never
//! merge again in the same turn.

use super::slide::{Axis, grouped};
use super::tile::Tile;

/// Merge equal adjacent pairs along the move axis and repack everything at
/// consecutive positions from `start` stepping by `step`.
///
/// The absorbing tile keeps the first operand's identity and `prev` cell
/// and is flagged `newly_merged`. Returns the new store and the score
/// delta: the post-merge value of every merge that occurred.
pub fn combine(tiles: &[Tile], axis: Axis, start: i32, step: i32) -> (Vec<Tile>, u32) {
    let mut out = Vec::with_capacity(tiles.len());
    let mut score_delta = 0u32;

    for group in grouped(tiles, axis, step) {
        let mut pos = start;
        let mut i = 0;
        while i < group.len() {
            if i + 1 < group.len() && group[i].value == group[i + 1].value {
                let mut merged = group[i].clone();
                merged.value *= 2;
                axis.set(&mut merged.pos, pos);
                merged.newly_merged = true;
                score_delta += merged.value;
                out.push(merged);
                i += 2;
            } else {
                let mut tile = group[i].clone();
                axis.set(&mut tile.pos, pos);
                out.push(tile);
                i += 1;
            }
            pos += step;
        }
    }
    (out, score_delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::slide::slide;
    use glam::IVec2;
    use proptest::prelude::*;

    fn tile(id: u32, value: u32, x: i32, y: i32) -> Tile {
        Tile::new(id, value, IVec2::new(x, y))
    }

    #[test]
    fn merges_adjacent_pair_and_repacks() {
        // Two 2s and a lone 4, moved left
        let tiles = vec![tile(0, 2, 0, 0), tile(1, 2, 1, 0), tile(2, 4, 3, 0)];
        let (merged, delta) = combine(&tiles, Axis::X, 0, 1);

        assert_eq!(delta, 4);
        assert_eq!(merged.len(), 2);

        let pair = &merged[0];
        assert_eq!(pair.value, 4);
        assert_eq!(pair.pos, IVec2::new(0, 0));
        assert!(pair.newly_merged);
        assert_eq!(pair.id, 0, "absorbing tile keeps the first operand's id");

        let lone = &merged[1];
        assert_eq!(lone.value, 4);
        assert_eq!(lone.pos, IVec2::new(1, 0));
        assert!(!lone.newly_merged);
    }

    #[test]
    fn merged_tile_cannot_merge_again_this_turn() {
        // 2 2 4: the pair becomes a 4 next to the existing 4, but the scan
        // has already consumed it
        let tiles = vec![tile(0, 2, 0, 0), tile(1, 2, 1, 0), tile(2, 4, 2, 0)];
        let (merged, delta) = combine(&tiles, Axis::X, 0, 1);
        assert_eq!(merged.len(), 2);
        assert_eq!(delta, 4);
        assert!(merged.iter().all(|t| t.value == 4));
    }

    #[test]
    fn triple_merges_only_the_leading_pair() {
        let tiles = vec![tile(0, 2, 0, 0), tile(1, 2, 1, 0), tile(2, 2, 2, 0)];
        let (merged, delta) = combine(&tiles, Axis::X, 0, 1);

        assert_eq!(delta, 4);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].value, 4);
        assert_eq!(merged[1].value, 2);
        assert_eq!(merged[1].pos, IVec2::new(1, 0));
    }

    #[test]
    fn quad_merges_into_two_pairs() {
        let tiles = (0..4).map(|x| tile(x as u32, 2, x, 0)).collect::<Vec<_>>();
        let (merged, delta) = combine(&tiles, Axis::X, 0, 1);

        assert_eq!(delta, 8);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|t| t.value == 4 && t.newly_merged));
    }

    #[test]
    fn rightward_merge_packs_toward_far_edge() {
        let tiles = vec![tile(0, 2, 0, 0), tile(1, 2, 2, 0)];
        let slid = slide(&tiles, Axis::X, 3, -1);
        let (merged, delta) = combine(&slid, Axis::X, 3, -1);

        assert_eq!(delta, 4);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].pos, IVec2::new(3, 0));
        // Traversal starts from the far edge, so the rightmost tile absorbs
        assert_eq!(merged[0].id, 1);
    }

    fn tile_store() -> impl Strategy<Value = Vec<Tile>> {
        proptest::sample::subsequence((0usize..16).collect::<Vec<_>>(), 0..=16).prop_flat_map(|cells| {
            let len = cells.len();
            (
                Just(cells),
                proptest::collection::vec(1u32..=5, len..=len),
            )
                .prop_map(|(cells, exps)| {
                    cells
                        .iter()
                        .zip(exps)
                        .enumerate()
                        .map(|(id, (cell, exp))| {
                            tile(id as u32, 1 << exp, (cell % 4) as i32, (cell / 4) as i32)
                        })
                        .collect()
                })
        })
    }

    proptest! {
        /// Tile count drops by exactly the number of merges, the board's
        /// value sum is conserved, and the score delta equals the sum of
        /// the post-merge values.
        #[test]
        fn slide_and_combine_conserve_tiles(tiles in tile_store()) {
            let slid = slide(&tiles, Axis::X, 0, 1);
            let (merged, delta) = combine(&slid, Axis::X, 0, 1);

            let merges = merged.iter().filter(|t| t.newly_merged).count();
            prop_assert_eq!(merged.len(), tiles.len() - merges);

            let sum_in: u64 = tiles.iter().map(|t| t.value as u64).sum();
            let sum_out: u64 = merged.iter().map(|t| t.value as u64).sum();
            prop_assert_eq!(sum_in, sum_out);

            let merged_values: u64 = merged
                .iter()
                .filter(|t| t.newly_merged)
                .map(|t| t.value as u64)
                .sum();
            prop_assert_eq!(delta as u64, merged_values);
        }

        #[test]
        fn slide_and_combine_never_duplicate_cells(tiles in tile_store()) {
            let slid = slide(&tiles, Axis::Y, 0, 1);
            let (merged, _) = combine(&slid, Axis::Y, 0, 1);
            for (i, a) in merged.iter().enumerate() {
                for b in &merged[i + 1..] {
                    prop_assert_ne!(a.pos, b.pos);
                }
            }
        }
    }
}
