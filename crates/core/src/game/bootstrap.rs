//! Run construction: every floor is generated and populated up front, then
//! the player is dropped at the first floor's entrance.
//! It does not own turn flow once the run has started.

use std::mem;

use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;
use tracing::info;

use super::*;
use crate::ai::MonsterAi;
use crate::error::GenerationError;
use crate::floor::Floor;
use crate::mapgen::{ItemSpawn, MapGenerator, MonsterSpawn};
use crate::stats::StatBlock;

impl Game {
    pub fn new(seed: u64, config: SimConfig) -> Result<Self, GenerationError> {
        let generator = MapGenerator::new(seed, &config)?;

        let mut floors = Vec::with_capacity(config.floor_count);
        let mut populations: Vec<(Vec<MonsterSpawn>, Vec<ItemSpawn>)> =
            Vec::with_capacity(config.floor_count);
        for depth in 0..config.floor_count {
            let mut generated = generator.generate(depth);
            let monsters = mem::take(&mut generated.monster_spawns);
            let items = mem::take(&mut generated.item_spawns);
            populations.push((monsters, items));
            floors.push(Floor::from_generated(generated));
        }

        let mut state = GameState {
            floors,
            entities: SlotMap::with_key(),
            items: SlotMap::with_key(),
            inventory: Vec::new(),
            player_id: EntityId::default(),
            depth: 0,
        };
        for (depth, (monsters, items)) in populations.into_iter().enumerate() {
            for spawn in monsters {
                state.spawn_entity(
                    depth,
                    spawn.pos,
                    StatBlock::dynamic_npc(spawn.tier),
                    Some(MonsterAi::default()),
                );
            }
            for spawn in items {
                state.spawn_item(depth, spawn.pos, spawn.kind);
            }
        }

        // The entrance is a stair tile, which spawns never use, so this is
        // the entrance itself in practice.
        let entrance = state.floors[0].entrance();
        let start = state.floors[0].nearest_free(entrance).unwrap_or(entrance);
        state.player_id = state.spawn_entity(0, start, StatBlock::player(), None);

        let visibility = compute_fov(start, config.fov_radius, &state.floors[0]);
        let mut game = Self {
            seed,
            journal: CommandJournal::new(seed, config.clone()),
            config,
            turn: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state,
            phase: Phase::PlayerTurn,
            visibility,
            log: Vec::new(),
        };

        let mut events = vec![GameEvent::EnteredFloor { depth: 0 }];
        game.refresh_visibility(&mut events);
        game.log.extend(events);

        info!(
            seed,
            floors = game.state.floors.len(),
            monsters = game.state.entities.len() - 1,
            items = game.state.items.len(),
            "run started"
        );
        Ok(game)
    }
}
