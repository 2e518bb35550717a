use serde::{Deserialize, Serialize};

use crate::types::{DisplayIndex, display};

pub const PLAYER_NAME: &str = "You";
pub const PLAYER_BASE_HP: i32 = 20;
pub const PLAYER_HP_PER_BODY: i32 = 3;
pub const PLAYER_POWER: i32 = 5;
pub const PLAYER_BASE_DEFENSE: i32 = 2;
pub const PLAYER_BASE_EVASION: i32 = 10;
pub const PLAYER_BASE_MANA: i32 = 10;
pub const PLAYER_MANA_PER_MIND: i32 = 4;
/// Regeneration rates are in tenths of a point per turn.
pub const PLAYER_BASE_REGEN_TENTHS: i32 = 2;

pub const XP_PER_LEVEL: i32 = 100;

const MAX_DYNAMIC_EVASION: i32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpcKind {
    Blob,
    MuscleBlob,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NpcStats {
    pub name: &'static str,
    pub hp: i32,
    pub power: i32,
    pub defense: i32,
    pub evasion: i32,
    pub xp: i32,
    pub display: DisplayIndex,
}

pub fn get_npc_stats(kind: NpcKind) -> NpcStats {
    match kind {
        NpcKind::Blob => NpcStats {
            name: "Blobman",
            hp: 6,
            power: 3,
            defense: 0,
            evasion: 0,
            xp: 10,
            display: display::BLOB,
        },
        NpcKind::MuscleBlob => NpcStats {
            name: "Muscle Blobman",
            hp: 14,
            power: 8,
            defense: 1,
            evasion: 0,
            xp: 35,
            display: display::MUSCLE_BLOB,
        },
    }
}

/// Blob whose numbers grow with `tier`; spawn tiers rise two per floor.
pub fn get_dynamic_blob_stats(tier: u32) -> NpcStats {
    let t = tier as i32;
    let (name, display) = match tier {
        0..2 => ("Blobman", display::BLOB),
        2..4 => ("Leg Blobman", display::LEG_BLOB),
        _ => ("Muscle Blobman", display::MUSCLE_BLOB),
    };
    NpcStats {
        name,
        hp: 6 + 2 * t,
        power: 3 + t,
        defense: t / 3,
        evasion: (5 + t).min(MAX_DYNAMIC_EVASION),
        xp: 10 + 5 * t,
        display,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_blobs_scale_and_cap_evasion() {
        let weakest = get_dynamic_blob_stats(0);
        assert_eq!((weakest.hp, weakest.power, weakest.defense, weakest.evasion), (6, 3, 0, 5));
        assert_eq!(weakest.xp, 10);

        let mid = get_dynamic_blob_stats(3);
        assert_eq!((mid.hp, mid.defense, mid.display), (12, 1, display::LEG_BLOB));

        let deep = get_dynamic_blob_stats(40);
        assert_eq!(deep.evasion, 30);
        assert_eq!(deep.display, display::MUSCLE_BLOB);
    }
}
