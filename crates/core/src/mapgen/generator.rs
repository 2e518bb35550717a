//! High-level map generation orchestration that composes layout, stairs, derived maps and spawns.

use tracing::debug;

use crate::config::SimConfig;
use crate::error::GenerationError;
use crate::types::TileKind;

use super::grid::{index, transparency_map, wall_adjacency_mask};
use super::layout::{carve_rooms, connect_cycle, scatter_nodes};
use super::model::GeneratedFloor;
use super::seed::{SeedStream, derive_floor_seed};
use super::spawns::{SpawnContext, generate_item_spawns, generate_monster_spawns};

const NODE_PHASE: u64 = 1;
const CORRIDOR_PHASE: u64 = 2;
const ROOM_PHASE: u64 = 3;
const MONSTER_PHASE: u64 = 4;
const ITEM_PHASE: u64 = 5;

#[derive(Clone, Debug)]
pub struct MapGenerator {
    run_seed: u64,
    width: usize,
    height: usize,
    node_count: usize,
    room_count: usize,
    monsters_per_floor: usize,
    items_per_floor: usize,
}

impl MapGenerator {
    pub fn new(run_seed: u64, config: &SimConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self {
            run_seed,
            width: config.map_width,
            height: config.map_height,
            node_count: config.node_count,
            room_count: config.room_count,
            monsters_per_floor: config.monsters_per_floor,
            items_per_floor: config.items_per_floor,
        })
    }

    pub fn generate(&self, depth: usize) -> GeneratedFloor {
        let floor_seed = derive_floor_seed(self.run_seed, depth);
        let mut tiles = vec![TileKind::Wall; self.width * self.height];

        let nodes = scatter_nodes(
            &mut SeedStream::new(floor_seed, NODE_PHASE),
            self.width,
            self.height,
            self.node_count,
        );
        connect_cycle(
            &mut tiles,
            self.width,
            self.height,
            &mut SeedStream::new(floor_seed, CORRIDOR_PHASE),
            &nodes,
        );
        let rooms = carve_rooms(
            &mut tiles,
            self.width,
            self.height,
            &mut SeedStream::new(floor_seed, ROOM_PHASE),
            &nodes,
            self.room_count,
        );

        // Nodes sit inside the border margin, so both stair cells are on the grid.
        let entrance = nodes[0];
        let exit = nodes[1];
        tiles[index(self.width, entrance)] = TileKind::UpStair;
        tiles[index(self.width, exit)] = TileKind::DownStair;

        let opaque = transparency_map(&tiles);
        let wall_mask = wall_adjacency_mask(&tiles, self.width, self.height);

        let spawn_context = SpawnContext {
            depth,
            width: self.width,
            height: self.height,
            tiles: &tiles,
            rooms: &rooms,
        };
        let monster_spawns = generate_monster_spawns(
            &spawn_context,
            &mut SeedStream::new(floor_seed, MONSTER_PHASE),
            self.monsters_per_floor,
        );
        let item_spawns = generate_item_spawns(
            &spawn_context,
            &mut SeedStream::new(floor_seed, ITEM_PHASE),
            self.items_per_floor,
        );

        debug!(
            depth,
            rooms = rooms.len(),
            monsters = monster_spawns.len(),
            items = item_spawns.len(),
            "generated floor"
        );

        GeneratedFloor {
            width: self.width,
            height: self.height,
            depth,
            tiles,
            nodes,
            rooms,
            entrance,
            exit,
            opaque,
            wall_mask,
            monster_spawns,
            item_spawns,
        }
    }
}
