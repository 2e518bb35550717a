pub mod actions;
pub mod ai;
pub mod combat;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod floor;
pub mod game;
pub mod journal;
pub mod mapgen;
pub mod replay;
pub mod state;
pub mod stats;
pub mod types;

pub use actions::{ActionKind, ActionPools, ActionSpec};
pub use ai::{AiState, MonsterAi};
pub use config::SimConfig;
pub use error::{CommandError, GenerationError};
pub use events::{GameEvent, Tone};
pub use floor::Floor;
pub use game::{FloorView, Game, TurnReport, Visibility, VisibilityMap, compute_fov};
pub use journal::{CommandJournal, CommandRecord, JournalError};
pub use mapgen::{GeneratedFloor, MapGenerator, generate_floor};
pub use replay::*;
pub use state::{Entity, GameState, Item};
pub use stats::{Attributes, StatBlock};
pub use types::*;
