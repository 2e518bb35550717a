//! Procedural map generation domain split into coherent submodules.

pub mod model;

mod generator;
mod grid;
mod layout;
mod seed;
mod spawns;

use crate::config::SimConfig;
use crate::error::GenerationError;

pub use generator::MapGenerator;
pub use grid::{MASK_ALL, MASK_EAST, MASK_NORTH, MASK_SOUTH, MASK_WEST};
pub use model::{GeneratedFloor, ItemSpawn, MonsterSpawn, Room};

pub(crate) use grid::{in_bounds, index};
#[cfg(test)]
pub(crate) use grid::{transparency_map, wall_adjacency_mask};

pub fn generate_floor(
    run_seed: u64,
    depth: usize,
    config: &SimConfig,
) -> Result<GeneratedFloor, GenerationError> {
    Ok(MapGenerator::new(run_seed, config)?.generate(depth))
}
