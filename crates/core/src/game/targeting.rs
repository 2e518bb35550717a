//! Ranged attack geometry and the commit step of targeting mode.

use std::cmp::Ordering;

use super::*;
use crate::combat::pay_cost;

const BLOCKER_PENALTY: i32 = -5;

/// `num / den` rounded to the nearest integer, ties to even.
fn round_half_even(num: i32, den: i32) -> i32 {
    let (num, den) = if den < 0 { (-num, -den) } else { (num, den) };
    let floor = num.div_euclid(den);
    match (2 * num.rem_euclid(den)).cmp(&den) {
        Ordering::Less => floor,
        Ordering::Greater => floor + 1,
        Ordering::Equal if floor % 2 == 0 => floor,
        Ordering::Equal => floor + 1,
    }
}

/// Cells of the straight line from the origin to `target`, both ends
/// included, stepping one unit along the major axis.
pub fn line_offsets(target: Pos) -> Vec<Pos> {
    let (dy, dx) = (target.y, target.x);
    if dx != 0 && dy.abs() < dx.abs() {
        let sx = dx.signum();
        (0..=dx.abs())
            .map(|i| Pos { y: round_half_even(i * dy, dx) * sx, x: i * sx })
            .collect()
    } else {
        let sy = dy.signum();
        (0..=dy.abs())
            .map(|i| {
                let x = if dy == 0 { 0 } else { round_half_even(i * dx, dy) * sy };
                Pos { y: i * sy, x }
            })
            .collect()
    }
}

/// Offsets inside the disc of radius `radius - 0.5`, row-major.
pub fn aoe_offsets(radius: i32) -> Vec<Pos> {
    let limit = (2 * radius - 1).pow(2);
    let mut offsets = Vec::new();
    for y in -radius..=radius {
        for x in -radius..=radius {
            if 4 * (y * y + x * x) <= limit {
                offsets.push(Pos { y, x });
            }
        }
    }
    offsets
}

impl Game {
    /// Walls and occupied cells strictly between the player and the target.
    pub(super) fn count_blockers(&self, offset: Pos) -> i32 {
        let origin = self.state.player().pos;
        let floor = self.state.floor();
        let blockers = line_offsets(offset)
            .into_iter()
            .filter(|&step| step != Pos::default() && step != offset)
            .map(|step| origin.offset(step.y, step.x))
            .filter(|&cell| floor.tile_at(cell).is_wall() || floor.entity_at(cell).is_some())
            .count();
        blockers as i32
    }

    pub(super) fn commit_attack(
        &mut self,
        offset: Pos,
        events: &mut Vec<GameEvent>,
    ) -> Result<Flow, CommandError> {
        let player_id = self.state.player_id;
        let player = self.state.player();
        let origin = player.pos;
        let Some(progress) = player.stats.progress() else {
            return Err(CommandError::NoRangedAbility);
        };
        let action = progress.pools.active_ranged;
        let range = action.range(&progress.attributes);
        let target = origin.offset(offset.y, offset.x);
        if offset == Pos::default()
            || origin.distance_sq(target) > range * range
            || !self.visibility.is_visible(target)
        {
            return Err(CommandError::InvalidTarget);
        }
        let cost = action.spec().cost;
        if cost > progress.mana() {
            return Err(CommandError::InsufficientMana { action, cost, mana: progress.mana() });
        }

        let blockers = self.count_blockers(offset);
        pay_cost(&mut self.state.player_mut().stats, action);
        self.phase = Phase::PlayerTurn;

        let aoe = action.spec().aoe;
        let victims: Vec<EntityId> = if aoe > 1 {
            aoe_offsets(aoe)
                .into_iter()
                .filter_map(|step| self.state.living_entity_at(target.offset(step.y, step.x)))
                .filter(|&id| id != player_id)
                .collect()
        } else {
            self.state.living_entity_at(target).into_iter().collect()
        };
        let hit_modifier = if aoe > 1 { 0 } else { blockers * BLOCKER_PENALTY };
        debug!(?action, ?offset, blockers, victims = victims.len(), "ranged attack");

        if victims.is_empty() {
            events.push(GameEvent::FiredIntoDistance { action });
        }
        for victim in victims {
            self.strike(victim, action, hit_modifier, events);
        }
        Ok(Flow::TurnTaken)
    }
}

#[cfg(test)]
mod tests {
    use crate::game::test_support::{add_blob, arena_game};
    use super::*;
    use crate::actions::ActionKind;

    fn aim(game: &mut Game, action: ActionKind) {
        game.submit(Command::SelectAbility(action)).expect("known action");
        game.submit(Command::EnterRangedTargeting).expect("enough mana");
    }

    fn player_mana(game: &Game) -> i32 {
        game.state().player().stats.mana()
    }

    #[test]
    fn shallow_lines_round_ties_to_even() {
        let line = line_offsets(Pos::new(2, 4));
        assert_eq!(
            line,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 2), Pos::new(2, 3), Pos::new(2, 4)]
        );
    }

    #[test]
    fn steep_lines_step_along_y() {
        let line = line_offsets(Pos::new(-3, 1));
        assert_eq!(line, vec![Pos::new(0, 0), Pos::new(-1, 0), Pos::new(-2, 1), Pos::new(-3, 1)]);
        assert_eq!(line_offsets(Pos::new(0, 0)), vec![Pos::new(0, 0)]);
        assert_eq!(line_offsets(Pos::new(0, -2)).last(), Some(&Pos::new(0, -2)));
    }

    #[test]
    fn blast_disc_drops_the_far_corners() {
        let disc = aoe_offsets(3);
        assert_eq!(disc.len(), 21);
        assert!(disc.contains(&Pos::new(0, 0)));
        assert!(disc.contains(&Pos::new(1, 2)));
        assert!(!disc.contains(&Pos::new(2, 2)));
        assert!(!disc.contains(&Pos::new(0, 3)));
        assert_eq!(aoe_offsets(1), vec![Pos::new(0, 0)]);
    }

    #[test]
    fn occupants_between_shooter_and_target_count_as_blockers() {
        let mut game = arena_game();
        let origin = game.state().player().pos;
        add_blob(&mut game, origin.offset(0, 2));
        add_blob(&mut game, origin.offset(0, 4));
        assert_eq!(game.count_blockers(Pos::new(0, 4)), 1);
        assert_eq!(game.count_blockers(Pos::new(0, 2)), 0);
        assert_eq!(game.count_blockers(Pos::new(1, 0)), 0);
    }

    #[test]
    fn shooting_a_visible_monster_spends_mana_and_a_turn() {
        let mut game = arena_game();
        let origin = game.state().player().pos;
        add_blob(&mut game, origin.offset(0, 3));
        aim(&mut game, ActionKind::Shoot);
        let report = game.submit(Command::CommitAttack { offset: Pos::new(0, 3) }).expect("valid");
        assert!(report.turn_consumed);
        assert_eq!(game.current_turn(), 1);
        assert!(report.events.iter().any(|event| matches!(
            event,
            GameEvent::PlayerHit { action: ActionKind::Shoot, .. }
                | GameEvent::PlayerMissed { action: ActionKind::Shoot }
        )));
        assert!(player_mana(&game) <= 8);
    }

    #[test]
    fn out_of_range_targets_keep_the_player_aiming() {
        let mut game = arena_game();
        aim(&mut game, ActionKind::Shoot);
        assert_eq!(
            game.submit(Command::CommitAttack { offset: Pos::new(0, 8) }),
            Err(CommandError::InvalidTarget)
        );
        assert_eq!(
            game.submit(Command::CommitAttack { offset: Pos::new(0, 0) }),
            Err(CommandError::InvalidTarget)
        );
        assert_eq!(game.phase(), Phase::Targeting);
        assert_eq!(player_mana(&game), 10);
    }

    #[test]
    fn empty_target_fires_into_the_distance_and_still_costs_mana() {
        let mut game = arena_game();
        aim(&mut game, ActionKind::Shoot);
        let report = game.submit(Command::CommitAttack { offset: Pos::new(2, 2) }).expect("valid");
        assert!(report.events.contains(&GameEvent::FiredIntoDistance { action: ActionKind::Shoot }));
        assert_eq!(game.phase(), Phase::PlayerTurn);
        // Two spent, then one regen tick of two tenths.
        assert_eq!(player_mana(&game), 8);
    }

    #[test]
    fn blast_pays_once_and_strikes_everyone_in_the_disc() {
        let mut game = arena_game();
        let origin = game.state().player().pos;
        add_blob(&mut game, origin.offset(0, 4));
        add_blob(&mut game, origin.offset(1, 3));
        add_blob(&mut game, origin.offset(-2, 3));
        aim(&mut game, ActionKind::Blast);
        let report = game.submit(Command::CommitAttack { offset: Pos::new(0, 3) }).expect("valid");
        let attacks = report
            .events
            .iter()
            .filter(|event| {
                matches!(event, GameEvent::PlayerHit { .. } | GameEvent::PlayerMissed { .. })
            })
            .count();
        assert_eq!(attacks, 3);
        assert_eq!(player_mana(&game), 5);
    }
}
