//! Session-level event payloads.

use game_core::{Lesson, PartySlot, SpawnAnnouncement};
use serde::{Deserialize, Serialize};

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterOutcome {
    Victory,
    Defeat,
}

/// Milestones of a session, between and around encounters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    EncounterStarted {
        index: u32,
        day: u32,
        /// Monster names in spawn order.
        monsters: Vec<String>,
    },
    EncounterFinished {
        index: u32,
        outcome: EncounterOutcome,
        /// Inputs fed to the engine.
        inputs: usize,
    },
    /// The party made camp; everyone is back at full health.
    Rested { day: u32 },
    /// The dungeon ecosystem changed overnight.
    Ecosystem(SpawnAnnouncement),
    Trained {
        slot: PartySlot,
        mentor: String,
        lesson: Lesson,
    },
}
