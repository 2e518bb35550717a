//! Attack resolution over stat blocks: mana cost, percentile hit roll,
//! damage through defense, and the death/experience side effects.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::actions::ActionKind;
use crate::stats::StatBlock;

/// Uniform integer in `0..100`.
pub fn roll_percent(rng: &mut ChaCha8Rng) -> i32 {
    (rng.next_u64() % 100) as i32
}

/// Hit test shared by every attack. Zero accuracy never hits, even on a roll of 0.
pub fn is_hit(roll: i32, accuracy: i32, evasion: i32, hit_modifier: i32) -> bool {
    accuracy > 0 && roll <= accuracy - evasion + hit_modifier
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub action: ActionKind,
    pub roll: i32,
    pub hit: bool,
    /// Damage after the defender's defense; zero on a miss.
    pub damage: i32,
    pub killed: bool,
    pub xp_awarded: i32,
    pub level_up_ready: bool,
}

/// Resolves one player action against one defender. Mana is paid before
/// the roll, so a miss still costs it.
pub fn attempt_attack(
    attacker: &mut StatBlock,
    defender: &mut StatBlock,
    action: ActionKind,
    hit_modifier: i32,
    rng: &mut ChaCha8Rng,
) -> AttackOutcome {
    pay_cost(attacker, action);
    resolve_attack(attacker, defender, action, hit_modifier, rng)
}

/// Deducts the action's mana cost, if any.
pub fn pay_cost(attacker: &mut StatBlock, action: ActionKind) {
    let cost = action.spec().cost;
    if cost > 0 {
        attacker.spend_mana(cost);
    }
}

/// Roll and damage for an attack whose cost has already been paid. Area
/// attacks pay once and resolve against every defender in the blast.
pub fn resolve_attack(
    attacker: &mut StatBlock,
    defender: &mut StatBlock,
    action: ActionKind,
    hit_modifier: i32,
    rng: &mut ChaCha8Rng,
) -> AttackOutcome {
    let roll = roll_percent(rng);
    let mut outcome = AttackOutcome {
        action,
        roll,
        hit: false,
        damage: 0,
        killed: false,
        xp_awarded: 0,
        level_up_ready: false,
    };
    if !is_hit(roll, action.spec().accuracy, defender.evasion(), hit_modifier) {
        return outcome;
    }

    let raw = action.damage(&attacker.attributes());
    let change = defender.change_hp(-raw);
    outcome.hit = true;
    outcome.damage = change.applied;
    if change.died {
        outcome.killed = true;
        outcome.xp_awarded = defender.xp_award();
        outcome.level_up_ready = attacker.gain_xp(outcome.xp_awarded);
    }
    outcome
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeleeOutcome {
    pub roll: i32,
    pub hit: bool,
    pub damage: i32,
    pub killed: bool,
}

/// Monster swing: always full accuracy, damage is the attacker's power.
pub fn monster_melee(
    attacker: &StatBlock,
    defender: &mut StatBlock,
    rng: &mut ChaCha8Rng,
) -> MeleeOutcome {
    let roll = roll_percent(rng);
    if !is_hit(roll, 100, defender.evasion(), 0) {
        return MeleeOutcome { roll, hit: false, damage: 0, killed: false };
    }
    let change = defender.change_hp(-attacker.power());
    MeleeOutcome { roll, hit: true, damage: change.applied, killed: change.died }
}
