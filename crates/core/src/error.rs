//! Error types for construction-time validation and rejected player commands.
//!
//! Nothing in here is raised as a panic: generation problems surface when a
//! generator or game is built, and command problems come back as values from
//! `Game::submit` so the presentation layer can log them.

use crate::actions::ActionKind;

/// Invalid generator or run configuration, reported before anything is built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("map dimensions {width}x{height} are below the minimum of {min}x{min}")]
    MapTooSmall { width: usize, height: usize, min: usize },

    #[error("at least {min} anchor nodes are required, got {nodes}")]
    TooFewNodes { nodes: usize, min: usize },

    #[error("room count {rooms} exceeds node count {nodes}")]
    TooManyRooms { rooms: usize, nodes: usize },

    #[error("a run needs at least one floor")]
    NoFloors,

    #[error("field-of-view radius must be positive, got {0}")]
    InvalidFovRadius(i32),
}

/// Why a submitted command was refused. State is left untouched on rejection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("You can't move there")]
    InvalidMove,

    #[error("Target not valid")]
    InvalidTarget,

    #[error("Not enough mana for {action} (needs {cost}, have {mana})")]
    InsufficientMana { action: ActionKind, cost: i32, mana: i32 },

    #[error("No ranged ability selected")]
    NoRangedAbility,

    #[error("You are not aiming at anything")]
    NotTargeting,

    #[error("Finish aiming or cancel first")]
    TargetingInProgress,

    #[error("There is no level-up to spend")]
    NoLevelUpPending,

    #[error("Choose a stat to increase: (a)rm, (l)eg, (b)ody, (m)ind")]
    LevelUpPending,

    #[error("Nothing here to pick up")]
    NothingToPickUp,

    #[error("{0} is not available")]
    AbilityUnavailable(ActionKind),

    #[error("Can't go {0} here")]
    NoStairsHere(&'static str),

    #[error("The stairs are blocked")]
    StairsBlocked,

    #[error("You have deconstituted")]
    PlayerDead,
}
