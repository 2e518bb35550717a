//! Accepted player commands in submission order, with everything needed to
//! rebuild the run they came from.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::types::Command;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandJournal {
    pub format_version: u16,
    pub seed: u64,
    pub config: SimConfig,
    pub commands: Vec<CommandRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: Command,
}

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("journal format version {found} is not supported (expected {JOURNAL_FORMAT_VERSION})")]
    UnsupportedVersion { found: u16 },

    #[error("malformed journal: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl CommandJournal {
    pub fn new(seed: u64, config: SimConfig) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, config, commands: Vec::new() }
    }

    pub fn push(&mut self, command: Command) {
        let seq = self.commands.len() as u64;
        self.commands.push(CommandRecord { seq, command });
    }

    pub fn to_json(&self) -> Result<String, JournalError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, JournalError> {
        let journal: Self = serde_json::from_str(text)?;
        if journal.format_version != JOURNAL_FORMAT_VERSION {
            return Err(JournalError::UnsupportedVersion { found: journal.format_version });
        }
        Ok(journal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionKind;
    use crate::types::{AttributeKind, Direction, Pos};

    #[test]
    fn sequence_numbers_follow_insertion_order() {
        let mut journal = CommandJournal::new(5, SimConfig::default());
        journal.push(Command::Wait);
        journal.push(Command::Move(Direction::NorthEast));
        let seqs: Vec<u64> = journal.commands.iter().map(|record| record.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
    }

    #[test]
    fn json_keeps_every_command_shape() {
        let mut journal = CommandJournal::new(11, SimConfig { floor_count: 2, ..SimConfig::default() });
        journal.push(Command::SelectAbility(ActionKind::Blast));
        journal.push(Command::EnterRangedTargeting);
        journal.push(Command::CommitAttack { offset: Pos::new(-2, 3) });
        journal.push(Command::ChooseLevelUpStat(AttributeKind::Mind));
        let text = journal.to_json().expect("serialize");
        assert_eq!(CommandJournal::from_json(&text).expect("parse"), journal);
    }

    #[test]
    fn future_format_versions_are_refused() {
        let mut journal = CommandJournal::new(1, SimConfig::default());
        journal.format_version = 9;
        let text = journal.to_json().expect("serialize");
        assert!(matches!(
            CommandJournal::from_json(&text),
            Err(JournalError::UnsupportedVersion { found: 9 })
        ));
    }
}
