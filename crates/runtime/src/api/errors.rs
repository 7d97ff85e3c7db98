//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the encounter engine and from decision providers so
//! clients can bubble them up with consistent context.
use game_core::{EncounterError, ErrorSeverity, GameError, PartySlot};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error("session requires content to be configured before building")]
    MissingContent,

    #[error("no monster type can spawn")]
    NoMonsters,

    #[error("every party member has fallen")]
    PartyDefeated,

    #[error("encounter did not finish within {limit} inputs")]
    Stalled { limit: usize },

    #[error("decision script has no {kind} choice left")]
    ScriptExhausted { kind: &'static str },

    #[error("no options offered to {actor}")]
    NoOptions { actor: PartySlot },

    #[error("no party member in slot {0}")]
    UnknownSlot(PartySlot),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encounter(error) => error.severity(),
            Self::MissingContent | Self::NoMonsters | Self::PartyDefeated => {
                ErrorSeverity::Validation
            }
            Self::ScriptExhausted { .. } | Self::NoOptions { .. } | Self::UnknownSlot(_) => {
                ErrorSeverity::Validation
            }
            Self::Stalled { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Encounter(error) => error.error_code(),
            Self::MissingContent => "RUNTIME_MISSING_CONTENT",
            Self::NoMonsters => "RUNTIME_NO_MONSTERS",
            Self::PartyDefeated => "RUNTIME_PARTY_DEFEATED",
            Self::Stalled { .. } => "RUNTIME_STALLED",
            Self::ScriptExhausted { .. } => "RUNTIME_SCRIPT_EXHAUSTED",
            Self::NoOptions { .. } => "RUNTIME_NO_OPTIONS",
            Self::UnknownSlot(_) => "RUNTIME_UNKNOWN_SLOT",
        }
    }
}
