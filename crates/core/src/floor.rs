//! One dungeon level: immutable terrain and derived maps, occupancy indices,
//! entity and item lists, and the persistent revealed memory.

use crate::mapgen::{GeneratedFloor, Room, in_bounds, index};
use crate::types::{EntityId, ItemId, Pos, TileKind};

#[derive(Clone, Debug)]
pub struct Floor {
    pub depth: usize,
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    opaque: Vec<bool>,
    wall_mask: Vec<u8>,
    rooms: Vec<Room>,
    entrance: Pos,
    exit: Pos,
    revealed: Vec<bool>,
    entity_at: Vec<Option<EntityId>>,
    item_at: Vec<Option<ItemId>>,
    /// Every entity ever placed here, dead ones included, in turn order.
    pub entities: Vec<EntityId>,
    pub items: Vec<ItemId>,
}

impl Floor {
    pub fn from_generated(generated: GeneratedFloor) -> Self {
        let cells = generated.width * generated.height;
        Self {
            depth: generated.depth,
            width: generated.width,
            height: generated.height,
            tiles: generated.tiles,
            opaque: generated.opaque,
            wall_mask: generated.wall_mask,
            rooms: generated.rooms,
            entrance: generated.entrance,
            exit: generated.exit,
            revealed: vec![false; cells],
            entity_at: vec![None; cells],
            item_at: vec![None; cells],
            entities: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn entrance(&self) -> Pos {
        self.entrance
    }

    pub fn exit(&self) -> Pos {
        self.exit
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn wall_mask(&self) -> &[u8] {
        &self.wall_mask
    }

    pub fn revealed(&self) -> &[bool] {
        &self.revealed
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        in_bounds(self.width, self.height, pos)
    }

    pub fn index(&self, pos: Pos) -> usize {
        index(self.width, pos)
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    /// Off-grid cells block sight so scans close at the map edge.
    pub fn blocks_sight(&self, pos: Pos) -> bool {
        !self.in_bounds(pos) || self.opaque[self.index(pos)]
    }

    pub fn wall_mask_at(&self, pos: Pos) -> Option<u8> {
        self.in_bounds(pos).then(|| self.wall_mask[self.index(pos)])
    }

    pub fn is_revealed(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.revealed[self.index(pos)]
    }

    /// OR-accumulates the cells flagged in `visible`; never clears anything.
    pub fn update_revealed(&mut self, visible: &[bool]) {
        debug_assert_eq!(visible.len(), self.revealed.len());
        for (revealed, &seen) in self.revealed.iter_mut().zip(visible) {
            *revealed |= seen;
        }
    }

    pub fn entity_at(&self, pos: Pos) -> Option<EntityId> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.entity_at[self.index(pos)]
    }

    pub fn item_at(&self, pos: Pos) -> Option<ItemId> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.item_at[self.index(pos)]
    }

    /// Non-wall and on the grid; ignores occupancy.
    pub fn is_passable(&self, pos: Pos) -> bool {
        !self.tile_at(pos).is_wall()
    }

    /// Passable and not held by a blocking entity.
    pub fn is_free(&self, pos: Pos) -> bool {
        self.is_passable(pos) && self.entity_at(pos).is_none()
    }

    /// Registers `id` in turn order and, when it blocks, in the occupancy grid.
    pub fn add_entity(&mut self, id: EntityId, pos: Pos, blocking: bool) {
        self.entities.push(id);
        if blocking {
            self.occupy(id, pos);
        }
    }

    /// Drops `id` from this floor entirely (used when it leaves by stairs).
    pub fn remove_entity(&mut self, id: EntityId, pos: Pos) {
        self.entities.retain(|&other| other != id);
        self.vacate(id, pos);
    }

    pub fn occupy(&mut self, id: EntityId, pos: Pos) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.entity_at[idx] = Some(id);
        }
    }

    /// Clears the cell only if `id` is the current occupant.
    pub fn vacate(&mut self, id: EntityId, pos: Pos) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            if self.entity_at[idx] == Some(id) {
                self.entity_at[idx] = None;
            }
        }
    }

    pub fn move_entity(&mut self, id: EntityId, from: Pos, to: Pos) {
        self.vacate(id, from);
        self.occupy(id, to);
    }

    pub fn add_item(&mut self, id: ItemId, pos: Pos) {
        self.items.push(id);
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.item_at[idx] = Some(id);
        }
    }

    pub fn remove_item(&mut self, id: ItemId, pos: Pos) {
        self.items.retain(|&other| other != id);
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            if self.item_at[idx] == Some(id) {
                self.item_at[idx] = None;
            }
        }
    }

    /// `pos` itself when free, otherwise the closest free cell by squared
    /// distance, scanning outward ring by ring in row-major order.
    pub fn nearest_free(&self, pos: Pos) -> Option<Pos> {
        if self.is_free(pos) {
            return Some(pos);
        }
        let max_radius = self.width.max(self.height) as i32;
        for radius in 1..=max_radius {
            let mut best: Option<Pos> = None;
            for y in (pos.y - radius)..=(pos.y + radius) {
                for x in (pos.x - radius)..=(pos.x + radius) {
                    let candidate = Pos { y, x };
                    if (y - pos.y).abs() != radius && (x - pos.x).abs() != radius {
                        continue;
                    }
                    if !self.is_free(candidate) {
                        continue;
                    }
                    let closer = best.is_none_or(|current| {
                        candidate.distance_sq(pos) < current.distance_sq(pos)
                    });
                    if closer {
                        best = Some(candidate);
                    }
                }
            }
            if best.is_some() {
                return best;
            }
        }
        None
    }
}
