//! Per-monster behavior: a three-state machine driven by whether the player
//! can currently see the monster, with greedy single-step movement.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;
use serde::{Deserialize, Serialize};

use crate::floor::Floor;
use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Wandering,
    Searching,
    Attacking,
}

/// What a monster does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiDecision {
    MeleePlayer,
    Step(Pos),
    Idle,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterAi {
    pub state: AiState,
    /// Last known player position.
    pub target: Option<Pos>,
}

impl MonsterAi {
    /// Visibility is treated as mutual, so `perceives_player` is the
    /// monster's own "seen by the player" flag.
    pub fn update_state(&mut self, perceives_player: bool) {
        self.state = if perceives_player {
            AiState::Attacking
        } else if matches!(self.state, AiState::Attacking | AiState::Searching) {
            AiState::Searching
        } else {
            AiState::Wandering
        };
    }

    pub fn decide(
        &mut self,
        me: Pos,
        player: Pos,
        floor: &Floor,
        rng: &mut ChaCha8Rng,
    ) -> AiDecision {
        match self.state {
            AiState::Wandering => {
                let heading = Direction::ALL[(rng.next_u64() % 8) as usize];
                let next = heading.step(me);
                if floor.is_free(next) { AiDecision::Step(next) } else { AiDecision::Idle }
            }
            AiState::Attacking => {
                self.target = Some(player);
                if me.is_adjacent(player) {
                    AiDecision::MeleePlayer
                } else {
                    greedy_step(me, player, floor)
                }
            }
            AiState::Searching => {
                let Some(target) = self.target else {
                    self.state = AiState::Wandering;
                    return AiDecision::Idle;
                };
                if me.is_adjacent(target) {
                    self.state = AiState::Wandering;
                    AiDecision::Idle
                } else {
                    greedy_step(me, target, floor)
                }
            }
        }
    }
}

/// Straight toward `goal`, then 45 degrees to either side. No pathfinding,
/// so concave walls can hold a monster in place.
fn greedy_step(me: Pos, goal: Pos, floor: &Floor) -> AiDecision {
    let Some(primary) = Direction::from_delta(goal.y - me.y, goal.x - me.x) else {
        return AiDecision::Idle;
    };
    [primary, primary.rotated_left(), primary.rotated_right()]
        .into_iter()
        .map(|heading| heading.step(me))
        .find(|&next| floor.is_free(next))
        .map_or(AiDecision::Idle, AiDecision::Step)
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::game::test_support::{floor_from_rows, open_floor};

    #[test]
    fn unseen_monster_without_history_keeps_wandering() {
        let mut ai = MonsterAi::default();
        ai.update_state(false);
        assert_eq!(ai.state, AiState::Wandering);
        ai.update_state(true);
        assert_eq!(ai.state, AiState::Attacking);
        ai.update_state(false);
        assert_eq!(ai.state, AiState::Searching);
        ai.update_state(false);
        assert_eq!(ai.state, AiState::Searching);
    }

    #[test]
    fn adjacent_attacker_swings_instead_of_moving() {
        let floor = open_floor(8, 8);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ai = MonsterAi { state: AiState::Attacking, target: None };
        let decision = ai.decide(Pos::new(3, 3), Pos::new(4, 4), &floor, &mut rng);
        assert_eq!(decision, AiDecision::MeleePlayer);
        assert_eq!(ai.target, Some(Pos::new(4, 4)));
    }

    #[test]
    fn attacker_steps_diagonally_toward_the_player() {
        let floor = open_floor(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ai = MonsterAi { state: AiState::Attacking, target: None };
        let decision = ai.decide(Pos::new(2, 2), Pos::new(6, 5), &floor, &mut rng);
        assert_eq!(decision, AiDecision::Step(Pos::new(3, 3)));
    }

    #[test]
    fn blocked_primary_falls_back_to_plus_45_then_minus_45() {
        // Monster at (2,2) heading east; the east cell is a wall.
        let floor = floor_from_rows(&[
            "#######",
            "#.....#",
            "#..#..#",
            "#.....#",
            "#######",
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ai = MonsterAi { state: AiState::Attacking, target: None };
        let decision = ai.decide(Pos::new(2, 2), Pos::new(2, 5), &floor, &mut rng);
        assert_eq!(decision, AiDecision::Step(Pos::new(3, 3)));

        let walled = floor_from_rows(&[
            "#######",
            "#..#..#",
            "#..#..#",
            "#..#..#",
            "#######",
        ]);
        let decision = ai.decide(Pos::new(2, 2), Pos::new(2, 5), &walled, &mut rng);
        assert_eq!(decision, AiDecision::Idle);
    }

    #[test]
    fn searcher_gives_up_next_to_the_last_known_position() {
        let floor = open_floor(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut ai = MonsterAi { state: AiState::Searching, target: Some(Pos::new(5, 5)) };
        let decision = ai.decide(Pos::new(2, 5), Pos::new(8, 8), &floor, &mut rng);
        assert_eq!(decision, AiDecision::Step(Pos::new(3, 5)));
        let decision = ai.decide(Pos::new(4, 5), Pos::new(8, 8), &floor, &mut rng);
        assert_eq!(decision, AiDecision::Idle);
        assert_eq!(ai.state, AiState::Wandering);
    }

    #[test]
    fn wanderer_only_steps_onto_free_neighbours() {
        let floor = floor_from_rows(&["###", "#.#", "###"]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut ai = MonsterAi::default();
        for _ in 0..16 {
            assert_eq!(ai.decide(Pos::new(1, 1), Pos::new(0, 0), &floor, &mut rng), AiDecision::Idle);
        }
    }
}
