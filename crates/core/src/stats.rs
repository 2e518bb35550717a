//! Stat blocks: hit points with a fractional regen accumulator, combat
//! numbers, and the player-only attributes, mana, experience and actions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actions::{ActionKind, ActionPools};
use crate::content::{
    NpcKind, NpcStats, PLAYER_BASE_DEFENSE, PLAYER_BASE_EVASION, PLAYER_BASE_HP,
    PLAYER_BASE_MANA, PLAYER_BASE_REGEN_TENTHS, PLAYER_HP_PER_BODY, PLAYER_MANA_PER_MIND,
    PLAYER_NAME, PLAYER_POWER, XP_PER_LEVEL, get_dynamic_blob_stats, get_npc_stats,
};
use crate::types::{AttributeKind, DisplayIndex, display};

const TENTHS: i32 = 10;

/// Primary attributes: strength, agility, vitality and intellect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    pub arm: i32,
    pub leg: i32,
    pub body: i32,
    pub mind: i32,
}

impl Attributes {
    pub fn get(&self, kind: AttributeKind) -> i32 {
        match kind {
            AttributeKind::Arm => self.arm,
            AttributeKind::Leg => self.leg,
            AttributeKind::Body => self.body,
            AttributeKind::Mind => self.mind,
        }
    }

    fn raise(&mut self, kind: AttributeKind) {
        match kind {
            AttributeKind::Arm => self.arm += 1,
            AttributeKind::Leg => self.leg += 1,
            AttributeKind::Body => self.body += 1,
            AttributeKind::Mind => self.mind += 1,
        }
    }

    /// Componentwise `self >= requirements`.
    pub fn meets(&self, requirements: &Attributes) -> bool {
        self.arm >= requirements.arm
            && self.leg >= requirements.leg
            && self.body >= requirements.body
            && self.mind >= requirements.mind
    }
}

/// Result of one `change_hp` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HpChange {
    /// Healing actually restored, or damage actually dealt after defense.
    pub applied: i32,
    pub hp: i32,
    /// Set only on the call that took the block from alive to dead.
    pub died: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub level: i32,
    pub stat: AttributeKind,
    pub unlocked: Vec<ActionKind>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub attributes: Attributes,
    mana_tenths: i32,
    max_mana: i32,
    hp_regen_tenths: i32,
    mana_regen_tenths: i32,
    xp: i32,
    level: i32,
    level_up_pending: bool,
    pub pools: ActionPools,
}

impl PlayerProgress {
    fn new() -> Self {
        let attributes = Attributes::default();
        Self {
            attributes,
            mana_tenths: PLAYER_BASE_MANA * TENTHS,
            max_mana: PLAYER_BASE_MANA,
            hp_regen_tenths: PLAYER_BASE_REGEN_TENTHS,
            mana_regen_tenths: PLAYER_BASE_REGEN_TENTHS,
            xp: 0,
            level: 1,
            level_up_pending: false,
            pools: ActionPools::innate(&attributes),
        }
    }

    pub fn mana(&self) -> i32 {
        self.mana_tenths / TENTHS
    }

    /// Mana including the regen fraction, in tenths.
    pub fn mana_tenths(&self) -> i32 {
        self.mana_tenths
    }

    pub fn max_mana(&self) -> i32 {
        self.max_mana
    }

    pub fn xp(&self) -> i32 {
        self.xp
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn level_up_pending(&self) -> bool {
        self.level_up_pending
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatProfile {
    Player(PlayerProgress),
    Npc(NpcKind),
    DynamicNpc { tier: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    name: String,
    profile: StatProfile,
    max_hp: i32,
    hp_tenths: i32,
    power: i32,
    defense: i32,
    evasion: i32,
    xp_award: i32,
    display: DisplayIndex,
    alive: bool,
}

impl StatBlock {
    pub fn player() -> Self {
        Self {
            name: PLAYER_NAME.to_string(),
            profile: StatProfile::Player(PlayerProgress::new()),
            max_hp: PLAYER_BASE_HP,
            hp_tenths: PLAYER_BASE_HP * TENTHS,
            power: PLAYER_POWER,
            defense: PLAYER_BASE_DEFENSE,
            evasion: PLAYER_BASE_EVASION,
            xp_award: 0,
            display: display::PLAYER,
            alive: true,
        }
    }

    pub fn npc(kind: NpcKind) -> Self {
        Self::from_npc_stats(StatProfile::Npc(kind), get_npc_stats(kind))
    }

    pub fn dynamic_npc(tier: u32) -> Self {
        Self::from_npc_stats(StatProfile::DynamicNpc { tier }, get_dynamic_blob_stats(tier))
    }

    fn from_npc_stats(profile: StatProfile, stats: NpcStats) -> Self {
        Self {
            name: stats.name.to_string(),
            profile,
            max_hp: stats.hp,
            hp_tenths: stats.hp * TENTHS,
            power: stats.power,
            defense: stats.defense.max(0),
            evasion: stats.evasion.max(0),
            xp_award: stats.xp,
            display: stats.display,
            alive: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &StatProfile {
        &self.profile
    }

    pub fn hp(&self) -> i32 {
        self.hp_tenths / TENTHS
    }

    /// Hit points including the regen fraction, in tenths.
    pub fn hp_tenths(&self) -> i32 {
        self.hp_tenths
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn power(&self) -> i32 {
        self.power
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn evasion(&self) -> i32 {
        self.evasion
    }

    pub fn xp_award(&self) -> i32 {
        self.xp_award
    }

    pub fn display(&self) -> DisplayIndex {
        self.display
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn progress(&self) -> Option<&PlayerProgress> {
        match &self.profile {
            StatProfile::Player(progress) => Some(progress),
            _ => None,
        }
    }

    pub fn progress_mut(&mut self) -> Option<&mut PlayerProgress> {
        match &mut self.profile {
            StatProfile::Player(progress) => Some(progress),
            _ => None,
        }
    }

    /// Attribute vector used for action scaling; zero for monsters.
    pub fn attributes(&self) -> Attributes {
        self.progress().map(|progress| progress.attributes).unwrap_or_default()
    }

    pub fn mana(&self) -> i32 {
        self.progress().map_or(0, PlayerProgress::mana)
    }

    pub fn level_up_pending(&self) -> bool {
        self.progress().is_some_and(PlayerProgress::level_up_pending)
    }

    /// Positive `delta` heals up to `max_hp`; negative `delta` is raw damage,
    /// reduced by defense and never below zero. Death is reported once.
    pub fn change_hp(&mut self, delta: i32) -> HpChange {
        if delta > 0 {
            if !self.alive {
                return HpChange { applied: 0, hp: self.hp(), died: false };
            }
            let before = self.hp();
            self.hp_tenths = (self.hp_tenths + delta * TENTHS).min(self.max_hp * TENTHS);
            return HpChange { applied: self.hp() - before, hp: self.hp(), died: false };
        }

        let damage = (-delta - self.defense).max(0);
        self.hp_tenths = (self.hp_tenths - damage * TENTHS).max(0);
        let died = self.alive && self.hp() <= 0;
        if died {
            self.alive = false;
            self.hp_tenths = 0;
            self.display = display::DECONSTITUTED;
        }
        HpChange { applied: damage, hp: self.hp(), died }
    }

    /// One turn of passive regeneration for hp and mana. Only players regenerate.
    pub fn regenerate(&mut self) {
        if !self.alive {
            return;
        }
        let max_hp_tenths = self.max_hp * TENTHS;
        let StatProfile::Player(progress) = &mut self.profile else {
            return;
        };
        self.hp_tenths = (self.hp_tenths + progress.hp_regen_tenths).min(max_hp_tenths);
        progress.mana_tenths =
            (progress.mana_tenths + progress.mana_regen_tenths).min(progress.max_mana * TENTHS);
    }

    /// Deducts `cost` mana, bottoming out at zero.
    pub fn spend_mana(&mut self, cost: i32) {
        if let Some(progress) = self.progress_mut() {
            progress.mana_tenths = (progress.mana_tenths - cost * TENTHS).max(0);
        }
    }

    /// Adds experience; returns true when this gain made a level-up pending.
    pub fn gain_xp(&mut self, amount: i32) -> bool {
        let Some(progress) = self.progress_mut() else {
            return false;
        };
        progress.xp += amount;
        if progress.xp >= XP_PER_LEVEL && !progress.level_up_pending {
            progress.level_up_pending = true;
            return true;
        }
        false
    }

    /// Raises `stat` by one, recomputes every derived number, spends one
    /// level's worth of experience and unlocks newly qualified actions.
    pub fn level_up(&mut self, stat: AttributeKind) -> Option<LevelUp> {
        let StatProfile::Player(progress) = &mut self.profile else {
            return None;
        };
        progress.attributes.raise(stat);
        let a = progress.attributes;

        self.defense = (PLAYER_BASE_DEFENSE + a.arm / 2 + a.body / 2).max(0);
        self.evasion = (2 * (PLAYER_BASE_EVASION + a.leg) - a.body).div_euclid(2).max(0);
        self.max_hp = PLAYER_BASE_HP + PLAYER_HP_PER_BODY * a.body;
        self.hp_tenths = self.hp_tenths.min(self.max_hp * TENTHS);
        progress.hp_regen_tenths = PLAYER_BASE_REGEN_TENTHS + a.body;
        progress.max_mana = PLAYER_BASE_MANA + PLAYER_MANA_PER_MIND * a.mind;
        progress.mana_regen_tenths = PLAYER_BASE_REGEN_TENTHS + a.mind;

        progress.xp = (progress.xp - XP_PER_LEVEL).max(0);
        progress.level += 1;
        progress.level_up_pending = progress.xp >= XP_PER_LEVEL;
        let unlocked = progress.pools.rescan(&a);

        debug!(level = progress.level, ?stat, ?unlocked, "level up");
        Some(LevelUp { level: progress.level, stat, unlocked })
    }
}
