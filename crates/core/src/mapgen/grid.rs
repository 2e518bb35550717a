//! Grid primitives and the derived maps computed from a finished terrain grid.

use crate::types::{Pos, TileKind};

pub const MASK_NORTH: u8 = 1;
pub const MASK_WEST: u8 = 2;
pub const MASK_EAST: u8 = 4;
pub const MASK_SOUTH: u8 = 8;
pub const MASK_ALL: u8 = MASK_NORTH | MASK_WEST | MASK_EAST | MASK_SOUTH;

pub(crate) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(crate) fn index(width: usize, pos: Pos) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

/// Writes `tile` when `pos` is on the grid; off-grid writes are dropped.
pub(super) fn set_clipped(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    pos: Pos,
    tile: TileKind,
) {
    if in_bounds(width, height, pos) {
        tiles[index(width, pos)] = tile;
    }
}

pub(crate) fn transparency_map(tiles: &[TileKind]) -> Vec<bool> {
    tiles.iter().map(|tile| tile.is_wall()).collect()
}

/// 4-bit code per cell naming which cardinal neighbours are walls.
/// Border cells have no full neighbourhood and are reported as fully enclosed.
pub(crate) fn wall_adjacency_mask(tiles: &[TileKind], width: usize, height: usize) -> Vec<u8> {
    let mut mask = vec![MASK_ALL; width * height];
    let is_wall = |x: usize, y: usize| tiles[y * width + x].is_wall();
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut code = 0;
            if is_wall(x, y - 1) {
                code |= MASK_NORTH;
            }
            if is_wall(x - 1, y) {
                code |= MASK_WEST;
            }
            if is_wall(x + 1, y) {
                code |= MASK_EAST;
            }
            if is_wall(x, y + 1) {
                code |= MASK_SOUTH;
            }
            mask[y * width + x] = code;
        }
    }
    mask
}
