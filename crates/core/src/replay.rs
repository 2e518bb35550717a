use tracing::warn;

use crate::error::{CommandError, GenerationError};
use crate::game::Game;
use crate::journal::CommandJournal;
use crate::types::Phase;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ReplayError {
    #[error("journal does not describe a valid run: {0}")]
    Generation(#[from] GenerationError),

    #[error("recorded command {seq} was rejected on replay: {error}")]
    Rejected { seq: u64, error: CommandError },
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_snapshot_hash: u64,
    pub final_turn: u64,
    pub final_phase: Phase,
    pub commands_applied: usize,
}

/// Rebuilds the run from its seed and config and feeds every recorded
/// command back in. Any rejection means the journal and the simulation have
/// diverged.
pub fn replay_to_end(journal: &CommandJournal) -> Result<ReplayResult, ReplayError> {
    let mut game = Game::new(journal.seed, journal.config.clone())?;
    for record in &journal.commands {
        if let Err(error) = game.submit(record.command.clone()) {
            warn!(seq = record.seq, %error, "replay diverged");
            return Err(ReplayError::Rejected { seq: record.seq, error });
        }
    }
    Ok(ReplayResult {
        final_snapshot_hash: game.snapshot_hash(),
        final_turn: game.current_turn(),
        final_phase: game.phase(),
        commands_applied: journal.commands.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::journal::CommandRecord;
    use crate::types::{Command, Direction};

    fn small_config() -> SimConfig {
        SimConfig {
            map_width: 40,
            map_height: 40,
            node_count: 8,
            room_count: 6,
            floor_count: 2,
            monsters_per_floor: 8,
            items_per_floor: 4,
            fov_radius: 8,
        }
    }

    #[test]
    fn replaying_a_live_journal_reproduces_the_snapshot() {
        let mut game = Game::new(777, small_config()).expect("valid config");
        let script = [
            Command::Wait,
            Command::Move(Direction::East),
            Command::Move(Direction::South),
            Command::PickUpItem,
            Command::Move(Direction::West),
            Command::Wait,
            Command::DescendStairs,
            Command::Move(Direction::North),
        ];
        for command in script {
            // Rejections are not journaled, so they need no special handling.
            let _ = game.submit(command);
        }

        let replay = replay_to_end(game.journal()).expect("journal replays cleanly");
        assert_eq!(replay.final_snapshot_hash, game.snapshot_hash());
        assert_eq!(replay.final_turn, game.current_turn());
        assert_eq!(replay.final_phase, game.phase());
        assert_eq!(replay.commands_applied, game.journal().commands.len());
    }

    #[test]
    fn tampered_journal_reports_the_diverging_command() {
        let mut journal = CommandJournal::new(3, small_config());
        journal.commands.push(CommandRecord { seq: 0, command: Command::CancelTargeting });
        assert_eq!(
            replay_to_end(&journal),
            Err(ReplayError::Rejected { seq: 0, error: CommandError::NotTargeting })
        );
    }

    #[test]
    fn invalid_config_is_a_generation_error() {
        let journal = CommandJournal::new(3, SimConfig { node_count: 1, ..small_config() });
        assert!(matches!(replay_to_end(&journal), Err(ReplayError::Generation(_))));
    }
}
