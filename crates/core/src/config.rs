//! Run configuration: map shape, generator knobs, population and sight radius.

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

pub const MIN_MAP_DIMENSION: usize = 8;
pub const MIN_NODE_COUNT: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub map_width: usize,
    pub map_height: usize,
    pub node_count: usize,
    pub room_count: usize,
    pub floor_count: usize,
    pub monsters_per_floor: usize,
    pub items_per_floor: usize,
    pub fov_radius: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 80,
            node_count: 16,
            room_count: 16,
            floor_count: 10,
            monsters_per_floor: 20,
            items_per_floor: 20,
            fov_radius: 8,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.map_width < MIN_MAP_DIMENSION || self.map_height < MIN_MAP_DIMENSION {
            return Err(GenerationError::MapTooSmall {
                width: self.map_width,
                height: self.map_height,
                min: MIN_MAP_DIMENSION,
            });
        }
        if self.node_count < MIN_NODE_COUNT {
            return Err(GenerationError::TooFewNodes {
                nodes: self.node_count,
                min: MIN_NODE_COUNT,
            });
        }
        if self.room_count > self.node_count {
            return Err(GenerationError::TooManyRooms {
                rooms: self.room_count,
                nodes: self.node_count,
            });
        }
        if self.floor_count == 0 {
            return Err(GenerationError::NoFloors);
        }
        if self.fov_radius <= 0 {
            return Err(GenerationError::InvalidFovRadius(self.fov_radius));
        }
        Ok(())
    }
}
