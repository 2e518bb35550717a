//! Monster and item placement inside carved rooms.

use crate::types::{ItemKind, Pos, TileKind};

use super::grid::{in_bounds, index};
use super::model::{ItemSpawn, MonsterSpawn, Room};
use super::seed::SeedStream;

const TIER_ROLL_SPAN: usize = 4;
const TIERS_PER_DEPTH: u32 = 2;

pub(super) struct SpawnContext<'a> {
    pub(super) depth: usize,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) tiles: &'a [TileKind],
    pub(super) rooms: &'a [Room],
}

impl SpawnContext<'_> {
    /// Picks a random room and a cell inside it, keeping one column and row
    /// clear of the far edge. `None` when the cell is not plain floor.
    fn roll_room_cell(&self, stream: &mut SeedStream) -> Option<Pos> {
        if self.rooms.is_empty() {
            return None;
        }
        let room = self.rooms[stream.range(0, self.rooms.len())];
        let pos = Pos {
            y: room.y + stream.range(0, (room.height - 1) as usize) as i32,
            x: room.x + stream.range(0, (room.width - 1) as usize) as i32,
        };
        let placeable = in_bounds(self.width, self.height, pos)
            && self.tiles[index(self.width, pos)] == TileKind::Floor;
        placeable.then_some(pos)
    }
}

/// One attempt per requested monster; attempts that land on a wall, a stair,
/// a clipped cell or an occupied cell are dropped rather than retried.
pub(super) fn generate_monster_spawns(
    context: &SpawnContext<'_>,
    stream: &mut SeedStream,
    count: usize,
) -> Vec<MonsterSpawn> {
    let mut occupied = vec![false; context.width * context.height];
    let mut spawns = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(pos) = context.roll_room_cell(stream) else {
            continue;
        };
        let tier = stream.range(0, TIER_ROLL_SPAN) as u32 + context.depth as u32 * TIERS_PER_DEPTH;
        let slot = index(context.width, pos);
        if occupied[slot] {
            continue;
        }
        occupied[slot] = true;
        spawns.push(MonsterSpawn { pos, tier });
    }
    spawns
}

pub(super) fn generate_item_spawns(
    context: &SpawnContext<'_>,
    stream: &mut SeedStream,
    count: usize,
) -> Vec<ItemSpawn> {
    let mut occupied = vec![false; context.width * context.height];
    let mut spawns = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(pos) = context.roll_room_cell(stream) else {
            continue;
        };
        let slot = index(context.width, pos);
        if occupied[slot] {
            continue;
        }
        occupied[slot] = true;
        spawns.push(ItemSpawn { kind: ItemKind::Rock, pos });
    }
    spawns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room_fixture() -> (Vec<TileKind>, Vec<Room>) {
        let width = 12;
        let mut tiles = vec![TileKind::Wall; width * width];
        let room = Room { x: 2, y: 2, width: 6, height: 5 };
        for cell in room.cells() {
            tiles[index(width, cell)] = TileKind::Floor;
        }
        tiles[index(width, Pos { y: 3, x: 3 })] = TileKind::UpStair;
        (tiles, vec![room])
    }

    #[test]
    fn spawns_only_land_on_unique_floor_cells() {
        let (tiles, rooms) = open_room_fixture();
        let context = SpawnContext { depth: 3, width: 12, height: 12, tiles: &tiles, rooms: &rooms };
        let mut stream = SeedStream::new(77, 5);
        let monsters = generate_monster_spawns(&context, &mut stream, 40);

        assert!(!monsters.is_empty());
        for (i, spawn) in monsters.iter().enumerate() {
            assert_eq!(tiles[index(12, spawn.pos)], TileKind::Floor);
            assert!((6..10).contains(&spawn.tier), "tier {} at depth 3", spawn.tier);
            assert!(monsters[..i].iter().all(|other| other.pos != spawn.pos));
            // The far column and row of the room are never rolled.
            assert!(spawn.pos.x < 7 && spawn.pos.y < 6);
        }
    }

    #[test]
    fn no_rooms_means_no_population() {
        let tiles = vec![TileKind::Floor; 64];
        let context = SpawnContext { depth: 0, width: 8, height: 8, tiles: &tiles, rooms: &[] };
        let mut stream = SeedStream::new(1, 1);
        assert!(generate_item_spawns(&context, &mut stream, 10).is_empty());
        assert!(generate_monster_spawns(&context, &mut stream, 10).is_empty());
    }
}
