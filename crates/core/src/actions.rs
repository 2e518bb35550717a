//! Static action registry and the per-player locked/available pools.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stats::Attributes;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Flail,
    Shoot,
    Blast,
    Kick,
    Punch,
    ThrowRock,
}

/// Fixed numbers for one action. Accuracy is a whole percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionSpec {
    pub kind: ActionKind,
    pub name: &'static str,
    pub requirements: Attributes,
    pub cost: i32,
    pub aoe: i32,
    pub base_damage: i32,
    pub accuracy: i32,
    pub base_range: i32,
}

const fn req(arm: i32, leg: i32, body: i32, mind: i32) -> Attributes {
    Attributes { arm, leg, body, mind }
}

const ROCK_WEIGHT: i32 = 6;
const MAX_THROW_BONUS: i32 = 6;

pub const REGISTRY: [ActionSpec; 6] = [
    ActionSpec {
        kind: ActionKind::Flail,
        name: "Flail",
        requirements: req(0, 0, 0, 0),
        cost: 0,
        aoe: 0,
        base_damage: 4,
        accuracy: 70,
        base_range: 1,
    },
    ActionSpec {
        kind: ActionKind::Shoot,
        name: "Shoot",
        requirements: req(0, 0, 0, 0),
        cost: 2,
        aoe: 0,
        base_damage: 4,
        accuracy: 70,
        base_range: 7,
    },
    ActionSpec {
        kind: ActionKind::Blast,
        name: "Blast",
        requirements: req(0, 0, 0, 0),
        cost: 5,
        aoe: 3,
        base_damage: 4,
        accuracy: 80,
        base_range: 4,
    },
    ActionSpec {
        kind: ActionKind::Kick,
        name: "Kick",
        requirements: req(0, 1, 0, 0),
        cost: 0,
        aoe: 0,
        base_damage: 4,
        accuracy: 60,
        base_range: 1,
    },
    ActionSpec {
        kind: ActionKind::Punch,
        name: "Punch",
        requirements: req(1, 0, 0, 0),
        cost: 0,
        aoe: 0,
        base_damage: 4,
        accuracy: 100,
        base_range: 1,
    },
    ActionSpec {
        kind: ActionKind::ThrowRock,
        name: "Throw Rock",
        requirements: req(1, 0, 0, 0),
        cost: 0,
        aoe: 0,
        base_damage: 6,
        accuracy: 100,
        base_range: 2,
    },
];

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Flail,
        ActionKind::Shoot,
        ActionKind::Blast,
        ActionKind::Kick,
        ActionKind::Punch,
        ActionKind::ThrowRock,
    ];

    pub fn spec(self) -> &'static ActionSpec {
        &REGISTRY[self as usize]
    }

    /// Damage before the defender's defense is applied.
    pub fn damage(self, attributes: &Attributes) -> i32 {
        let spec = self.spec();
        match self {
            ActionKind::Flail | ActionKind::Shoot | ActionKind::Blast => {
                spec.base_damage + attributes.body
            }
            ActionKind::Kick => spec.base_damage + 2 * attributes.leg,
            ActionKind::Punch => spec.base_damage + attributes.arm,
            ActionKind::ThrowRock => spec.base_damage * attributes.arm / ROCK_WEIGHT,
        }
    }

    /// Euclidean reach; 1 means melee.
    pub fn range(self, attributes: &Attributes) -> i32 {
        let spec = self.spec();
        match self {
            ActionKind::ThrowRock => {
                spec.base_range + MAX_THROW_BONUS.min(2 * attributes.arm / ROCK_WEIGHT)
            }
            _ => spec.base_range,
        }
    }

    /// Melee-ness is a property of the action kind, not of the current range.
    pub fn is_melee(self) -> bool {
        self.spec().base_range == 1
    }

    pub fn verb(self) -> &'static str {
        match self {
            ActionKind::Flail => "flail",
            ActionKind::Shoot => "shoot",
            ActionKind::Blast => "blast",
            ActionKind::Kick => "kick",
            ActionKind::Punch => "punch",
            ActionKind::ThrowRock => "throw a rock",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// Each known action sits in exactly one pool. Actions only ever move from
/// `locked` to `available`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPools {
    locked: Vec<ActionKind>,
    available: Vec<ActionKind>,
    pub active_melee: ActionKind,
    pub active_ranged: ActionKind,
}

impl ActionPools {
    /// Starting loadout: the innate actions sorted by the attribute vector.
    pub fn innate(attributes: &Attributes) -> Self {
        let mut pools = Self {
            locked: vec![
                ActionKind::Flail,
                ActionKind::Shoot,
                ActionKind::Blast,
                ActionKind::Kick,
                ActionKind::Punch,
            ],
            available: Vec::new(),
            active_melee: ActionKind::Flail,
            active_ranged: ActionKind::Shoot,
        };
        pools.rescan(attributes);
        pools
    }

    pub fn locked(&self) -> &[ActionKind] {
        &self.locked
    }

    pub fn available(&self) -> &[ActionKind] {
        &self.available
    }

    pub fn is_available(&self, kind: ActionKind) -> bool {
        self.available.contains(&kind)
    }

    pub fn knows(&self, kind: ActionKind) -> bool {
        self.available.contains(&kind) || self.locked.contains(&kind)
    }

    /// Moves every locked action whose requirements are met. Returns the
    /// actions that were unlocked by this call, in table order.
    pub fn rescan(&mut self, attributes: &Attributes) -> Vec<ActionKind> {
        let (unlocked, still_locked): (Vec<ActionKind>, Vec<ActionKind>) = self
            .locked
            .iter()
            .copied()
            .partition(|kind| attributes.meets(&kind.spec().requirements));
        self.locked = still_locked;
        self.available.extend(&unlocked);
        unlocked
    }

    /// Learns a new action, e.g. from an item. No-op when already known.
    pub fn grant(&mut self, kind: ActionKind, attributes: &Attributes) -> bool {
        if self.knows(kind) {
            return false;
        }
        if attributes.meets(&kind.spec().requirements) {
            self.available.push(kind);
        } else {
            self.locked.push(kind);
        }
        true
    }

    /// Makes `kind` the active melee or ranged action, by its kind.
    pub fn select(&mut self, kind: ActionKind) -> bool {
        if !self.is_available(kind) {
            return false;
        }
        if kind.is_melee() {
            self.active_melee = kind;
        } else {
            self.active_ranged = kind;
        }
        true
    }
}
