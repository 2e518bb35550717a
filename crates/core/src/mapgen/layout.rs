//! Anchor-node scatter, corridor cycle and room carving for base map topology.

use crate::types::{Pos, TileKind};

use super::grid::set_clipped;
use super::model::Room;
use super::seed::SeedStream;

const MAX_BORDER_MARGIN: usize = 10;
const MIN_ROOM_SIDE: usize = 3;
const MAX_ROOM_SIDE: usize = 10;
const NODE_REDRAW_ATTEMPTS: usize = 64;

pub(super) fn border_margin(dimension: usize) -> usize {
    MAX_BORDER_MARGIN.min(dimension / 4)
}

/// Scatters anchor nodes away from the border. Node 1 is redrawn while it
/// collides with node 0 so the entrance and exit are distinct cells.
pub(super) fn scatter_nodes(
    stream: &mut SeedStream,
    width: usize,
    height: usize,
    count: usize,
) -> Vec<Pos> {
    let margin_x = border_margin(width);
    let margin_y = border_margin(height);
    let draw = |stream: &mut SeedStream| Pos {
        y: stream.range(margin_y, height - margin_y) as i32,
        x: stream.range(margin_x, width - margin_x) as i32,
    };

    let mut nodes: Vec<Pos> = (0..count).map(|_| draw(stream)).collect();
    let mut attempts = 0;
    while nodes.len() > 1 && nodes[1] == nodes[0] && attempts < NODE_REDRAW_ATTEMPTS {
        nodes[1] = draw(stream);
        attempts += 1;
    }
    nodes
}

/// Links every node to its successor (wrapping) so the corridor graph is one cycle.
pub(super) fn connect_cycle(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    stream: &mut SeedStream,
    nodes: &[Pos],
) {
    for (i, &from) in nodes.iter().enumerate() {
        let to = nodes[(i + 1) % nodes.len()];
        carve_l_corridor(tiles, width, height, stream, from, to);
    }
    for &node in nodes {
        set_clipped(tiles, width, height, node, TileKind::Hall);
    }
}

/// Horizontal run from `from` toward `to`, switching rows at a random
/// breakpoint column, joined by a vertical run at that column.
fn carve_l_corridor(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    stream: &mut SeedStream,
    from: Pos,
    to: Pos,
) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let step_x = dx.signum();
    let step_y = dy.signum();
    let breakpoint = stream.range_inclusive(0, dx.unsigned_abs() as usize) as i32;

    for i in 0..dx.abs() {
        let row = if i < breakpoint { from.y } else { to.y };
        set_clipped(tiles, width, height, Pos { y: row, x: from.x + i * step_x }, TileKind::Hall);
    }
    let column = from.x + breakpoint * step_x;
    for i in 0..dy.abs() {
        set_clipped(tiles, width, height, Pos { y: from.y + i * step_y, x: column }, TileKind::Hall);
    }
}

/// Carves one room per leading node. Each room is shifted off its anchor but
/// always still covers it, which keeps every room on the corridor cycle.
pub(super) fn carve_rooms(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    stream: &mut SeedStream,
    nodes: &[Pos],
    room_count: usize,
) -> Vec<Room> {
    let mut rooms = Vec::with_capacity(room_count);
    for &anchor in nodes.iter().take(room_count) {
        let room_width = stream.range_inclusive(MIN_ROOM_SIDE, MAX_ROOM_SIDE);
        let room_height = stream.range_inclusive(MIN_ROOM_SIDE, MAX_ROOM_SIDE);
        let x_offset = stream.range_inclusive(0, room_width - 1) as i32;
        let y_offset = stream.range_inclusive(0, room_height - 1) as i32;
        let room = Room {
            x: anchor.x - x_offset,
            y: anchor.y - y_offset,
            width: room_width as i32,
            height: room_height as i32,
        };
        for cell in room.cells() {
            set_clipped(tiles, width, height, cell, TileKind::Floor);
        }
        rooms.push(room);
    }
    rooms
}
