//! Shared test fixtures: hand-drawn floors and small games built on them.
//! It does not own production gameplay logic.

use rand_chacha::rand_core::SeedableRng;
use slotmap::SlotMap;

use super::*;
use crate::ai::MonsterAi;
use crate::floor::Floor;
use crate::mapgen::{GeneratedFloor, transparency_map, wall_adjacency_mask};
use crate::stats::StatBlock;

/// `#` is wall, `<` and `>` are stairs, anything else is floor.
pub(crate) fn floor_from_rows(rows: &[&str]) -> Floor {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());
    let mut tiles = Vec::with_capacity(width * height);
    let mut entrance = Pos::default();
    let mut exit = Pos::default();
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), width, "ragged fixture row {y}");
        for (x, ch) in row.chars().enumerate() {
            let pos = Pos::new(y as i32, x as i32);
            tiles.push(match ch {
                '#' => TileKind::Wall,
                '<' => {
                    entrance = pos;
                    TileKind::UpStair
                }
                '>' => {
                    exit = pos;
                    TileKind::DownStair
                }
                _ => TileKind::Floor,
            });
        }
    }
    Floor::from_generated(GeneratedFloor {
        width,
        height,
        depth: 0,
        opaque: transparency_map(&tiles),
        wall_mask: wall_adjacency_mask(&tiles, width, height),
        tiles,
        nodes: vec![entrance, exit],
        rooms: Vec::new(),
        entrance,
        exit,
        monster_spawns: Vec::new(),
        item_spawns: Vec::new(),
    })
}

/// Open floor ringed by a one-cell wall.
pub(crate) fn open_floor(width: usize, height: usize) -> Floor {
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let edge = y == 0 || x == 0 || y == height - 1 || x == width - 1;
                    if edge { '#' } else { '.' }
                })
                .collect()
        })
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    floor_from_rows(&rows)
}

/// A single-floor game on `floors[0]` with the player at `start` and no
/// monsters. Extra floors can be supplied for stair tests.
pub(crate) fn game_on(floors: Vec<Floor>, start: Pos) -> Game {
    let config = SimConfig { floor_count: floors.len(), ..SimConfig::default() };
    let mut floors = floors;
    for (depth, floor) in floors.iter_mut().enumerate() {
        floor.depth = depth;
    }
    let mut state = GameState {
        floors,
        entities: SlotMap::with_key(),
        items: SlotMap::with_key(),
        inventory: Vec::new(),
        player_id: EntityId::default(),
        depth: 0,
    };
    state.player_id = state.spawn_entity(0, start, StatBlock::player(), None);
    let visibility = compute_fov(start, config.fov_radius, &state.floors[0]);
    let mut game = Game {
        seed: 0,
        journal: CommandJournal::new(0, config.clone()),
        config,
        turn: 0,
        rng: ChaCha8Rng::seed_from_u64(0),
        state,
        phase: Phase::PlayerTurn,
        visibility,
        log: Vec::new(),
    };
    let mut events = Vec::new();
    game.refresh_visibility(&mut events);
    game
}

/// 21x21 open room with the player in the middle.
pub(crate) fn arena_game() -> Game {
    game_on(vec![open_floor(21, 21)], Pos::new(10, 10))
}

/// Tier-zero blob on the current floor.
pub(crate) fn add_blob(game: &mut Game, pos: Pos) -> EntityId {
    let depth = game.state.depth;
    game.state.spawn_entity(depth, pos, StatBlock::dynamic_npc(0), Some(MonsterAi::default()))
}

pub(crate) fn add_rock(game: &mut Game, pos: Pos) -> ItemId {
    let depth = game.state.depth;
    game.state.spawn_item(depth, pos, ItemKind::Rock)
}
