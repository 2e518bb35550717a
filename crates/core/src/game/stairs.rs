//! Stair travel between the pre-generated floors of a run.

use super::*;

impl Game {
    pub(super) fn ascend_stairs(&mut self, events: &mut Vec<GameEvent>) -> Result<Flow, CommandError> {
        let depth = self.state.depth;
        let on_stair = self.state.floor().tile_at(self.state.player().pos) == TileKind::UpStair;
        if !on_stair || depth == 0 {
            return Err(CommandError::NoStairsHere("up"));
        }
        let landing = self.state.floors[depth - 1].exit();
        self.travel(depth - 1, landing, events)
    }

    pub(super) fn descend_stairs(
        &mut self,
        events: &mut Vec<GameEvent>,
    ) -> Result<Flow, CommandError> {
        let depth = self.state.depth;
        let on_stair = self.state.floor().tile_at(self.state.player().pos) == TileKind::DownStair;
        if !on_stair || depth + 1 >= self.state.floors.len() {
            return Err(CommandError::NoStairsHere("down"));
        }
        let landing = self.state.floors[depth + 1].entrance();
        self.travel(depth + 1, landing, events)
    }

    /// Moves the player onto floor `to`, at `anchor` or the closest free
    /// cell to it. Monsters left behind lose their "seen" flags.
    fn travel(
        &mut self,
        to: usize,
        anchor: Pos,
        events: &mut Vec<GameEvent>,
    ) -> Result<Flow, CommandError> {
        let Some(landing) = self.state.floors[to].nearest_free(anchor) else {
            return Err(CommandError::StairsBlocked);
        };
        let from = self.state.depth;
        let player_id = self.state.player_id;
        let origin = self.state.player().pos;

        self.state.floors[from].remove_entity(player_id, origin);
        for &id in &self.state.floors[from].entities {
            if let Some(entity) = self.state.entities.get_mut(id) {
                entity.visible = false;
            }
        }

        let player = self.state.player_mut();
        player.pos = landing;
        player.depth = to;
        self.state.floors[to].add_entity(player_id, landing, true);
        self.state.depth = to;

        events.push(GameEvent::EnteredFloor { depth: to });
        info!(from, to, ?landing, turn = self.turn, "floor transition");
        Ok(Flow::Free)
    }
}
