//! Owned snapshots for the presentation layer. Nothing in here borrows the
//! live simulation, so a view can be handed to another thread.

use super::*;
use crate::actions::ActionKind;
use crate::stats::Attributes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityView {
    pub id: EntityId,
    pub pos: Pos,
    pub name: String,
    pub display: DisplayIndex,
    pub alive: bool,
    pub visible: bool,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemView {
    pub id: ItemId,
    pub pos: Pos,
    pub name: &'static str,
    pub display: DisplayIndex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerView {
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub level: i32,
    pub xp: i32,
    pub attributes: Attributes,
    pub active_melee: ActionKind,
    pub active_ranged: ActionKind,
    pub available: Vec<ActionKind>,
    pub locked: Vec<ActionKind>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorView {
    pub depth: usize,
    pub width: usize,
    pub height: usize,
    pub phase: Phase,
    pub turn: u64,
    pub tiles: Vec<TileKind>,
    pub wall_mask: Vec<u8>,
    pub visibility: Vec<Visibility>,
    pub revealed: Vec<bool>,
    pub entities: Vec<EntityView>,
    pub items: Vec<ItemView>,
    pub player: PlayerView,
}

impl Game {
    pub fn view(&self) -> FloorView {
        let floor = self.state.floor();
        let entities = floor
            .entities
            .iter()
            .filter_map(|&id| self.state.entities.get(id))
            .map(|entity| EntityView {
                id: entity.id,
                pos: entity.pos,
                name: entity.name().to_string(),
                display: entity.display(),
                alive: entity.is_alive(),
                visible: entity.visible,
                hp: entity.stats.hp(),
                max_hp: entity.stats.max_hp(),
            })
            .collect();
        let items = floor
            .items
            .iter()
            .filter_map(|&id| self.state.items.get(id))
            .map(|item| ItemView {
                id: item.id,
                pos: item.pos,
                name: item.kind.name(),
                display: item.kind.display(),
            })
            .collect();

        FloorView {
            depth: self.state.depth,
            width: floor.width(),
            height: floor.height(),
            phase: self.phase,
            turn: self.turn,
            tiles: floor.tiles().to_vec(),
            wall_mask: floor.wall_mask().to_vec(),
            visibility: self.visibility.cells().to_vec(),
            revealed: floor.revealed().to_vec(),
            entities,
            items,
            player: self.player_view(),
        }
    }

    fn player_view(&self) -> PlayerView {
        let player = self.state.player();
        let stats = &player.stats;
        let (attributes, max_mana, level, xp, pools) = match stats.progress() {
            Some(progress) => (
                progress.attributes,
                progress.max_mana(),
                progress.level(),
                progress.xp(),
                Some(&progress.pools),
            ),
            None => (Attributes::default(), 0, 1, 0, None),
        };
        PlayerView {
            pos: player.pos,
            hp: stats.hp(),
            max_hp: stats.max_hp(),
            mana: stats.mana(),
            max_mana,
            level,
            xp,
            attributes,
            active_melee: pools.map_or(ActionKind::Flail, |pools| pools.active_melee),
            active_ranged: pools.map_or(ActionKind::Shoot, |pools| pools.active_ranged),
            available: pools.map(|pools| pools.available().to_vec()).unwrap_or_default(),
            locked: pools.map(|pools| pools.locked().to_vec()).unwrap_or_default(),
        }
    }
}
