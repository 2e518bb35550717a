//! Stable snapshot hashing for deterministic verification.
//! It does not own replay execution or journal persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::ai::AiState;
use crate::state::Entity;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.turn);
        hasher.write_u8(match self.phase {
            Phase::PlayerTurn => 0,
            Phase::Targeting => 1,
            Phase::LevelUp => 2,
            Phase::Dead => 3,
        });
        hasher.write_usize(self.state.depth);
        hasher.write_usize(self.state.inventory.len());

        let player = self.state.player();
        if let Some(progress) = player.stats.progress() {
            let a = progress.attributes;
            for value in [a.arm, a.leg, a.body, a.mind] {
                hasher.write_i32(value);
            }
            hasher.write_i32(progress.mana_tenths());
            hasher.write_i32(progress.xp());
            hasher.write_i32(progress.level());
            hasher.write_u8(progress.pools.active_melee as u8);
            hasher.write_u8(progress.pools.active_ranged as u8);
            for pool in [progress.pools.available(), progress.pools.locked()] {
                hasher.write_usize(pool.len());
                for &action in pool {
                    hasher.write_u8(action as u8);
                }
            }
        }

        for floor in &self.state.floors {
            hasher.write_usize(floor.entities.len());
            for &id in &floor.entities {
                if let Some(entity) = self.state.entities.get(id) {
                    hash_entity(&mut hasher, entity);
                }
            }
            for &id in &floor.items {
                if let Some(item) = self.state.items.get(id) {
                    hasher.write_i32(item.pos.y);
                    hasher.write_i32(item.pos.x);
                }
            }
            hasher.write_usize(floor.revealed().iter().filter(|&&seen| seen).count());
        }
        hasher.finish()
    }
}

fn hash_entity(hasher: &mut Xxh3, entity: &Entity) {
    hasher.write_i32(entity.pos.y);
    hasher.write_i32(entity.pos.x);
    hasher.write_i32(entity.stats.hp_tenths());
    hasher.write_u8(u8::from(entity.is_alive()));
    hasher.write_u8(u8::from(entity.visible));
    if let Some(ai) = &entity.ai {
        hasher.write_u8(match ai.state {
            AiState::Wandering => 0,
            AiState::Searching => 1,
            AiState::Attacking => 2,
        });
        if let Some(target) = ai.target {
            hasher.write_i32(target.y);
            hasher.write_i32(target.x);
        }
    }
}
