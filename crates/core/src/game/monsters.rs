//! The monster half of a tick. Player regeneration happens once up front,
//! then every living monster on the current floor acts in list order against
//! the occupancy left by the monsters before it.

use super::*;
use crate::ai::AiDecision;
use crate::combat::monster_melee;

impl Game {
    pub(super) fn run_monster_turn(&mut self, events: &mut Vec<GameEvent>) {
        self.state.player_mut().stats.regenerate();

        let roster = self.state.floor().entities.clone();
        for id in roster {
            if !self.state.player().is_alive() {
                break;
            }
            let Some(entity) = self.state.entities.get_mut(id) else {
                continue;
            };
            if !entity.is_alive() {
                continue;
            }
            let Some(mut ai) = entity.ai.take() else {
                continue;
            };
            let (me, seen) = (entity.pos, entity.visible);

            ai.update_state(seen);
            let player_pos = self.state.player().pos;
            let decision = ai.decide(me, player_pos, self.state.floor(), &mut self.rng);
            debug!(?id, state = ?ai.state, ?decision, "monster turn");
            self.state.entities[id].ai = Some(ai);

            match decision {
                AiDecision::Step(to) => self.state.move_entity(id, to),
                AiDecision::MeleePlayer => self.monster_attack(id, events),
                AiDecision::Idle => {}
            }
        }
    }

    fn monster_attack(&mut self, id: EntityId, events: &mut Vec<GameEvent>) {
        let player_id = self.state.player_id;
        let Some([monster, player]) = self.state.entities.get_disjoint_mut([id, player_id]) else {
            return;
        };
        let outcome = monster_melee(&monster.stats, &mut player.stats, &mut self.rng);
        let name = monster.name().to_string();
        if outcome.hit {
            events.push(GameEvent::MonsterHit { name, damage: outcome.damage });
        } else {
            events.push(GameEvent::MonsterMissed { name });
        }
        if outcome.killed {
            self.enter_dead(events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiState;
    use crate::game::test_support::{add_blob, arena_game, floor_from_rows, game_on};
    use crate::stats::StatBlock;

    fn is_monster_swing(event: &GameEvent) -> bool {
        matches!(event, GameEvent::MonsterHit { .. } | GameEvent::MonsterMissed { .. })
    }

    #[test]
    fn adjacent_visible_monster_swings_at_the_player() {
        let mut game = arena_game();
        let origin = game.state().player().pos;
        let blob = add_blob(&mut game, origin.offset(1, 1));
        let report = game.submit(Command::Wait).expect("wait");
        assert_eq!(report.events.iter().filter(|event| is_monster_swing(event)).count(), 1);
        let ai = game.state().entities[blob].ai.as_ref().expect("monster");
        assert_eq!(ai.state, AiState::Attacking);
        assert_eq!(ai.target, Some(origin));
    }

    #[test]
    fn later_monsters_see_cells_vacated_earlier_in_the_tick() {
        let floor = floor_from_rows(&["########", "#......#", "########"]);
        let mut game = game_on(vec![floor], Pos::new(1, 1));
        let front = add_blob(&mut game, Pos::new(1, 4));
        let back = add_blob(&mut game, Pos::new(1, 5));
        game.submit(Command::Wait).expect("wait");
        assert_eq!(game.state().entities[front].pos, Pos::new(1, 3));
        assert_eq!(game.state().entities[back].pos, Pos::new(1, 4));
    }

    #[test]
    fn monsters_stop_once_the_player_falls() {
        let mut game = arena_game();
        let origin = game.state().player().pos;
        for offset in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
            let id = add_blob(&mut game, origin.offset(offset.0, offset.1));
            game.state.entities[id].stats = StatBlock::dynamic_npc(40);
        }
        let mut guard = 0;
        let report = loop {
            let report = game.submit(Command::Wait).expect("alive until the report says otherwise");
            if report.phase == Phase::Dead || guard > 100 {
                break report;
            }
            guard += 1;
        };
        assert_eq!(report.phase, Phase::Dead);
        let died_at = report
            .events
            .iter()
            .position(|event| *event == GameEvent::PlayerDied)
            .expect("death reported");
        assert!(report.events[died_at..].iter().all(|event| !is_monster_swing(event)));
        assert!(matches!(report.events[died_at - 1], GameEvent::MonsterHit { .. }));
    }

    #[test]
    fn unseen_monsters_do_not_chase() {
        let floor = floor_from_rows(&[
            "###########",
            "#....#....#",
            "#....#....#",
            "#....#....#",
            "###########",
        ]);
        let mut game = game_on(vec![floor], Pos::new(2, 2));
        let hidden = add_blob(&mut game, Pos::new(2, 8));
        game.submit(Command::Wait).expect("wait");
        let entity = &game.state().entities[hidden];
        assert!(!entity.visible);
        assert_eq!(entity.ai.as_ref().map(|ai| ai.state), Some(AiState::Wandering));
        assert!(entity.pos.x >= 6);
    }
}
