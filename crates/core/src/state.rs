use slotmap::SlotMap;

use crate::ai::MonsterAi;
use crate::floor::Floor;
use crate::stats::StatBlock;
use crate::types::*;

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Pos,
    /// Index of the floor this entity stands on.
    pub depth: usize,
    /// Set while the player can see this entity.
    pub visible: bool,
    pub blocking: bool,
    pub stats: StatBlock,
    pub ai: Option<MonsterAi>,
}

impl Entity {
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn name(&self) -> &str {
        self.stats.name()
    }

    pub fn display(&self) -> DisplayIndex {
        self.stats.display()
    }
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub pos: Pos,
    pub depth: usize,
}

pub struct GameState {
    pub floors: Vec<Floor>,
    pub entities: SlotMap<EntityId, Entity>,
    pub items: SlotMap<ItemId, Item>,
    pub inventory: Vec<ItemId>,
    pub player_id: EntityId,
    pub depth: usize,
}

impl GameState {
    pub fn floor(&self) -> &Floor {
        &self.floors[self.depth]
    }

    pub fn floor_mut(&mut self) -> &mut Floor {
        &mut self.floors[self.depth]
    }

    pub fn player(&self) -> &Entity {
        &self.entities[self.player_id]
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.entities[self.player_id]
    }

    /// Inserts an entity and registers it with its floor.
    pub fn spawn_entity(
        &mut self,
        depth: usize,
        pos: Pos,
        stats: StatBlock,
        ai: Option<MonsterAi>,
    ) -> EntityId {
        let id = self.entities.insert(Entity {
            id: EntityId::default(),
            pos,
            depth,
            visible: false,
            blocking: true,
            stats,
            ai,
        });
        self.entities[id].id = id;
        self.floors[depth].add_entity(id, pos, true);
        id
    }

    pub fn spawn_item(&mut self, depth: usize, pos: Pos, kind: ItemKind) -> ItemId {
        let id = self.items.insert(Item { id: ItemId::default(), kind, pos, depth });
        self.items[id].id = id;
        self.floors[depth].add_item(id, pos);
        id
    }

    /// Dead bodies stay listed on their floor but stop blocking movement.
    pub fn settle_death(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        entity.blocking = false;
        let (depth, pos) = (entity.depth, entity.pos);
        self.floors[depth].vacate(id, pos);
    }

    pub fn move_entity(&mut self, id: EntityId, to: Pos) {
        let entity = &mut self.entities[id];
        let from = entity.pos;
        entity.pos = to;
        let depth = entity.depth;
        self.floors[depth].move_entity(id, from, to);
    }

    /// Living entity whose cell is `pos` on the current floor.
    pub fn living_entity_at(&self, pos: Pos) -> Option<EntityId> {
        self.floor()
            .entity_at(pos)
            .filter(|&id| self.entities.get(id).is_some_and(Entity::is_alive))
    }
}
