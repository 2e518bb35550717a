//! Player-turn commands other than aiming and stairs: movement with
//! bump-attacks, picking things up, ability selection and level-up choice.

use tracing::{debug, info};

use super::*;
use crate::actions::ActionKind;
use crate::combat::resolve_attack;

impl Game {
    pub(super) fn move_player(
        &mut self,
        direction: Direction,
        events: &mut Vec<GameEvent>,
    ) -> Result<Flow, CommandError> {
        let player_id = self.state.player_id;
        let target = direction.step(self.state.player().pos);

        if let Some(defender) = self.state.living_entity_at(target) {
            let action = self.active_melee();
            self.strike(defender, action, 0, events);
            return Ok(Flow::TurnTaken);
        }
        if !self.state.floor().is_free(target) {
            return Err(CommandError::InvalidMove);
        }
        self.state.move_entity(player_id, target);
        Ok(Flow::TurnTaken)
    }

    pub(super) fn pick_up_item(&mut self, events: &mut Vec<GameEvent>) -> Result<Flow, CommandError> {
        let pos = self.state.player().pos;
        let Some(item_id) = self.state.floor().item_at(pos) else {
            return Err(CommandError::NothingToPickUp);
        };
        let kind = self.state.items[item_id].kind;
        self.state.floor_mut().remove_item(item_id, pos);
        self.state.inventory.push(item_id);
        events.push(GameEvent::ItemPickedUp { name: kind.name() });

        let action = kind.grants();
        let player = &mut self.state.player_mut().stats;
        let attributes = player.attributes();
        if let Some(progress) = player.progress_mut()
            && progress.pools.grant(action, &attributes)
            && progress.pools.is_available(action)
        {
            events.push(GameEvent::AbilityUnlocked { action });
        }
        debug!(?kind, ?pos, "item picked up");
        Ok(Flow::TurnTaken)
    }

    pub(super) fn enter_ranged_targeting(
        &mut self,
        events: &mut Vec<GameEvent>,
    ) -> Result<Flow, CommandError> {
        let stats = &self.state.player().stats;
        let Some(progress) = stats.progress() else {
            return Err(CommandError::NoRangedAbility);
        };
        let action = progress.pools.active_ranged;
        if action.is_melee() || !progress.pools.is_available(action) {
            return Err(CommandError::NoRangedAbility);
        }
        let cost = action.spec().cost;
        if cost > progress.mana() {
            return Err(CommandError::InsufficientMana { action, cost, mana: progress.mana() });
        }
        self.phase = Phase::Targeting;
        events.push(GameEvent::TargetingStarted { action });
        Ok(Flow::Free)
    }

    pub(super) fn select_ability(
        &mut self,
        kind: ActionKind,
        events: &mut Vec<GameEvent>,
    ) -> Result<Flow, CommandError> {
        let selected = self
            .state
            .player_mut()
            .stats
            .progress_mut()
            .is_some_and(|progress| progress.pools.select(kind));
        if !selected {
            return Err(CommandError::AbilityUnavailable(kind));
        }
        events.push(GameEvent::AbilitySelected { action: kind });
        Ok(Flow::Free)
    }

    pub(super) fn choose_level_up_stat(
        &mut self,
        stat: AttributeKind,
        events: &mut Vec<GameEvent>,
    ) -> Result<Flow, CommandError> {
        let Some(outcome) = self.state.player_mut().stats.level_up(stat) else {
            return Err(CommandError::NoLevelUpPending);
        };
        events.push(GameEvent::LeveledUp { level: outcome.level, stat });
        for action in outcome.unlocked {
            events.push(GameEvent::AbilityUnlocked { action });
        }
        info!(level = outcome.level, ?stat, turn = self.turn, "player leveled up");
        self.phase = Phase::PlayerTurn;
        Ok(Flow::Resume)
    }

    fn active_melee(&self) -> ActionKind {
        self.state
            .player()
            .stats
            .progress()
            .map_or(ActionKind::Flail, |progress| progress.pools.active_melee)
    }

    /// One player action against one defender whose cost is already paid.
    /// Reports the hit or miss and settles a kill.
    pub(super) fn strike(
        &mut self,
        defender: EntityId,
        action: ActionKind,
        hit_modifier: i32,
        events: &mut Vec<GameEvent>,
    ) {
        let player_id = self.state.player_id;
        let Some([attacker, target]) = self.state.entities.get_disjoint_mut([player_id, defender])
        else {
            return;
        };
        let outcome =
            resolve_attack(&mut attacker.stats, &mut target.stats, action, hit_modifier, &mut self.rng);
        let name = target.name().to_string();
        debug!(?action, roll = outcome.roll, hit = outcome.hit, damage = outcome.damage, %name, "player attack");

        if outcome.hit {
            events.push(GameEvent::PlayerHit { action, target: name.clone(), damage: outcome.damage });
        } else {
            events.push(GameEvent::PlayerMissed { action });
        }
        if outcome.killed {
            self.state.settle_death(defender);
            events.push(GameEvent::MonsterDied { name });
        }
        if outcome.level_up_ready {
            let level = self.state.player().stats.progress().map_or(1, |progress| progress.level());
            events.push(GameEvent::LevelUpReady { level: level + 1 });
        }
    }
}
