//! Topic-based event distribution.
//!
//! Encounter events from the engine and session milestones are published on
//! separate topics so a consumer can follow only what it renders.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{EncounterOutcome, SessionEvent};
