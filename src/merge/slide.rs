//! Slide step
//!
//! Collapses every tile toward the start of its row or column without
//! merging. Equal-value tiles become adjacent but keep separate identity;
//! combining them is `combine`'s job.

use std::collections::BTreeMap;

use glam::IVec2;

use super::tile::Tile;

/// Movement axis of a merge-game move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Coordinate along the movement axis
    pub fn get(self, pos: IVec2) -> i32 {
        match self {
            Axis::X => pos.x,
            Axis::Y => pos.y,
        }
    }

    /// Replace the coordinate along the movement axis
    pub fn set(self, pos: &mut IVec2, v: i32) {
        match self {
            Axis::X => pos.x = v,
            Axis::Y => pos.y = v,
        }
    }

    /// Coordinate orthogonal to the movement axis (the group key)
    pub fn cross(self, pos: IVec2) -> i32 {
        match self {
            Axis::X => pos.y,
            Axis::Y => pos.x,
        }
    }
}

/// Group tiles by the orthogonal coordinate and sort each group along the
/// traversal order implied by `step` (ascending for positive, descending
/// for negative). Sorting is stable, so ties keep their original relative
/// order.
pub(crate) fn grouped(tiles: &[Tile], axis: Axis, step: i32) -> Vec<Vec<Tile>> {
    let mut groups: BTreeMap<i32, Vec<Tile>> = BTreeMap::new();
    for tile in tiles {
        groups
            .entry(axis.cross(tile.pos))
            .or_default()
            .push(tile.clone());
    }
    let mut groups: Vec<Vec<Tile>> = groups.into_values().collect();
    for group in &mut groups {
        if step > 0 {
            group.sort_by_key(|t| axis.get(t.pos));
        } else {
            group.sort_by_key(|t| std::cmp::Reverse(axis.get(t.pos)));
        }
    }
    groups
}

/// Repack every group at `start, start + step, ...`, recording each tile's
/// pre-slide cell in `prev` for animation. Clears the per-move flags.
pub fn slide(tiles: &[Tile], axis: Axis, start: i32, step: i32) -> Vec<Tile> {
    let mut out = Vec::with_capacity(tiles.len());
    for mut group in grouped(tiles, axis, step) {
        let mut pos = start;
        for tile in &mut group {
            tile.prev = tile.pos;
            axis.set(&mut tile.pos, pos);
            tile.newly_merged = false;
            tile.spawned = false;
            pos += step;
        }
        out.append(&mut group);
    }
    out
}
