//! Turn scheduler: validates one player command per call, runs the monster
//! turn when the command consumed time, and keeps sight data current.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::CommandError;
use crate::events::GameEvent;
use crate::journal::CommandJournal;
use crate::state::GameState;
use crate::types::*;

mod bootstrap;
mod commands;
mod hash;
mod monsters;
mod stairs;
mod targeting;
mod view;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

pub use targeting::{aoe_offsets, line_offsets};
pub use view::{EntityView, FloorView, ItemView, PlayerView};
pub use visibility::{Visibility, VisibilityMap, compute_fov};

/// Everything one accepted command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub events: Vec<GameEvent>,
    /// True when the command cost the player their turn.
    pub turn_consumed: bool,
    pub phase: Phase,
}

/// Whether an accepted command spent the player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Free,
    TurnTaken,
    /// A level-up was spent; the monster turn it held back runs now.
    Resume,
}

pub struct Game {
    seed: u64,
    config: SimConfig,
    turn: u64,
    rng: ChaCha8Rng,
    state: GameState,
    phase: Phase,
    visibility: VisibilityMap,
    log: Vec<GameEvent>,
    journal: CommandJournal,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn current_turn(&self) -> u64 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    /// Full message history since the run started, rejections included.
    pub fn log(&self) -> &[GameEvent] {
        &self.log
    }

    /// Accepted commands in submission order.
    pub fn journal(&self) -> &CommandJournal {
        &self.journal
    }

    /// Applies one command. A rejection leaves the simulation untouched and
    /// only records the reason in the log.
    pub fn submit(&mut self, command: Command) -> Result<TurnReport, CommandError> {
        let mut events = Vec::new();
        let flow = match self.dispatch(&command, &mut events) {
            Ok(flow) => flow,
            Err(error) => {
                debug!(?command, %error, "command rejected");
                self.log.push(GameEvent::CommandRejected(error.clone()));
                return Err(error);
            }
        };

        self.journal.push(command);
        match flow {
            Flow::Free => {}
            Flow::TurnTaken => {
                self.turn += 1;
                self.finish_player_turn(&mut events);
            }
            Flow::Resume => self.finish_player_turn(&mut events),
        }
        self.refresh_visibility(&mut events);

        self.log.extend(events.iter().cloned());
        Ok(TurnReport { events, turn_consumed: flow != Flow::Free, phase: self.phase })
    }

    fn dispatch(
        &mut self,
        command: &Command,
        events: &mut Vec<GameEvent>,
    ) -> Result<Flow, CommandError> {
        match (self.phase, command) {
            (Phase::Dead, _) => Err(CommandError::PlayerDead),

            (Phase::LevelUp, Command::ChooseLevelUpStat(stat)) => {
                self.choose_level_up_stat(*stat, events)
            }
            (Phase::LevelUp, _) => Err(CommandError::LevelUpPending),

            (Phase::Targeting, Command::CommitAttack { offset }) => {
                self.commit_attack(*offset, events)
            }
            (Phase::Targeting, Command::CancelTargeting) => {
                self.phase = Phase::PlayerTurn;
                events.push(GameEvent::TargetingCancelled);
                Ok(Flow::Free)
            }
            (Phase::Targeting, _) => Err(CommandError::TargetingInProgress),

            (Phase::PlayerTurn, Command::Move(direction)) => self.move_player(*direction, events),
            (Phase::PlayerTurn, Command::Wait) => Ok(Flow::TurnTaken),
            (Phase::PlayerTurn, Command::PickUpItem) => self.pick_up_item(events),
            (Phase::PlayerTurn, Command::EnterRangedTargeting) => {
                self.enter_ranged_targeting(events)
            }
            (Phase::PlayerTurn, Command::SelectAbility(kind)) => self.select_ability(*kind, events),
            (Phase::PlayerTurn, Command::AscendStairs) => self.ascend_stairs(events),
            (Phase::PlayerTurn, Command::DescendStairs) => self.descend_stairs(events),
            (Phase::PlayerTurn, Command::ChooseLevelUpStat(_)) => {
                Err(CommandError::NoLevelUpPending)
            }
            (Phase::PlayerTurn, Command::CommitAttack { .. } | Command::CancelTargeting) => {
                Err(CommandError::NotTargeting)
            }
        }
    }

    /// After a turn-consuming action: death ends the run, a pending level-up
    /// defers the monster turn until a stat is chosen.
    fn finish_player_turn(&mut self, events: &mut Vec<GameEvent>) {
        if !self.state.player().is_alive() {
            self.enter_dead(events);
            return;
        }
        if self.state.player().stats.level_up_pending() {
            self.phase = Phase::LevelUp;
            return;
        }
        self.phase = Phase::PlayerTurn;
        // Monsters perceive through the seen flags, so they must reflect
        // where the player now stands.
        self.refresh_visibility(events);
        self.run_monster_turn(events);
    }

    fn enter_dead(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != Phase::Dead {
            self.phase = Phase::Dead;
            events.push(GameEvent::PlayerDied);
            info!(turn = self.turn, depth = self.state.depth, "player died");
        }
    }

    /// Recomputes sight from the player, grows the revealed memory and
    /// refreshes every entity's "seen" flag on the current floor.
    fn refresh_visibility(&mut self, events: &mut Vec<GameEvent>) {
        let origin = self.state.player().pos;
        let map = compute_fov(origin, self.config.fov_radius, self.state.floor());
        self.state.floor_mut().update_revealed(&map.visible_mask());

        let player_id = self.state.player_id;
        let roster = self.state.floor().entities.clone();
        for id in roster {
            if id == player_id {
                continue;
            }
            let Some(entity) = self.state.entities.get_mut(id) else {
                continue;
            };
            let seen = map.is_visible(entity.pos);
            if seen && !entity.visible && entity.is_alive() {
                events.push(GameEvent::ComesIntoView { name: entity.name().to_string() });
            }
            entity.visible = seen;
        }
        self.visibility = map;
    }
}
