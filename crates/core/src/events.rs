//! Structured log messages produced by turns, each tagged with a tone.

use std::fmt;

use crate::actions::ActionKind;
use crate::error::CommandError;
use crate::types::AttributeKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Neutral,
    Good,
    Bad,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PlayerHit { action: ActionKind, target: String, damage: i32 },
    PlayerMissed { action: ActionKind },
    FiredIntoDistance { action: ActionKind },
    MonsterDied { name: String },
    LevelUpReady { level: i32 },
    LeveledUp { level: i32, stat: AttributeKind },
    AbilityUnlocked { action: ActionKind },
    AbilitySelected { action: ActionKind },
    TargetingStarted { action: ActionKind },
    TargetingCancelled,
    MonsterHit { name: String, damage: i32 },
    MonsterMissed { name: String },
    PlayerDied,
    ItemPickedUp { name: &'static str },
    EnteredFloor { depth: usize },
    ComesIntoView { name: String },
    CommandRejected(CommandError),
}

impl GameEvent {
    pub fn tone(&self) -> Tone {
        match self {
            GameEvent::PlayerHit { .. }
            | GameEvent::LevelUpReady { .. }
            | GameEvent::LeveledUp { .. }
            | GameEvent::AbilityUnlocked { .. }
            | GameEvent::MonsterMissed { .. } => Tone::Good,
            GameEvent::MonsterHit { .. } | GameEvent::PlayerDied => Tone::Bad,
            _ => Tone::Neutral,
        }
    }
}

fn stat_name(stat: AttributeKind) -> &'static str {
    match stat {
        AttributeKind::Arm => "arm",
        AttributeKind::Leg => "leg",
        AttributeKind::Body => "body",
        AttributeKind::Mind => "mind",
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PlayerHit { action, target, damage } => {
                write!(f, "You {} at the {target} for {damage} damage", action.verb())
            }
            GameEvent::PlayerMissed { .. } => f.write_str("You miss"),
            GameEvent::FiredIntoDistance { action } => {
                write!(f, "You {} into the distance...", action.verb())
            }
            GameEvent::MonsterDied { name } => write!(f, "The {name} deconstitutes"),
            GameEvent::LevelUpReady { level } => write!(
                f,
                "Your level increases to {level}! Choose a stat to increase: (a)rm, (l)eg, (b)ody, (m)ind"
            ),
            GameEvent::LeveledUp { level, stat } => {
                write!(f, "Your {} grows. You are now level {level}", stat_name(*stat))
            }
            GameEvent::AbilityUnlocked { action } => write!(f, "You can now {}", action.verb()),
            GameEvent::AbilitySelected { action } => write!(f, "{action} readied"),
            GameEvent::TargetingStarted { action } => write!(f, "Aiming {action}"),
            GameEvent::TargetingCancelled => f.write_str("You lower your aim"),
            GameEvent::MonsterHit { name, damage } => {
                write!(f, "{name} strikes for {damage} damage!")
            }
            GameEvent::MonsterMissed { name } => write!(f, "{name} swings and misses"),
            GameEvent::PlayerDied => f.write_str("You deconstitute..."),
            GameEvent::ItemPickedUp { name } => write!(f, "You pick up the {name}"),
            GameEvent::EnteredFloor { depth } => write!(f, "You enter floor {depth}"),
            GameEvent::ComesIntoView { name } => write!(f, "A {name} comes into view"),
            GameEvent::CommandRejected(error) => write!(f, "{error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_and_tones_read_like_the_log() {
        let hit = GameEvent::PlayerHit {
            action: ActionKind::Punch,
            target: String::from("Blobman"),
            damage: 5,
        };
        assert_eq!(hit.to_string(), "You punch at the Blobman for 5 damage");
        assert_eq!(hit.tone(), Tone::Good);

        let struck = GameEvent::MonsterHit { name: String::from("Blobman"), damage: 3 };
        assert_eq!(struck.to_string(), "Blobman strikes for 3 damage!");
        assert_eq!(struck.tone(), Tone::Bad);

        let rejected = GameEvent::CommandRejected(CommandError::NothingToPickUp);
        assert_eq!(rejected.to_string(), "Nothing here to pick up");
        assert_eq!(rejected.tone(), Tone::Neutral);
    }
}
