//! Error types for the encounter state machine.

use crate::action::ActionId;
use crate::check::CheckError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::CombatantId;

use super::WaitReason;

/// Errors surfaced while driving an [`Encounter`](super::Encounter).
///
/// Invalid selections (out-of-range indices, inputs that do not fit the
/// current phase) are not errors; they come back as
/// [`Step::Ignored`](super::Step::Ignored).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("encounter is busy ({reason:?}); continue before selecting")]
    Busy { reason: WaitReason },

    #[error("action {0} is not in the catalog")]
    UnknownAction(ActionId),

    #[error("combatant {0} is not part of this encounter")]
    UnknownCombatant(CombatantId),

    #[error("skill check failed: {0}")]
    Check(#[from] CheckError),
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Busy { .. } => ErrorSeverity::Recoverable,
            Self::UnknownAction(_) => ErrorSeverity::Validation,
            Self::UnknownCombatant(_) => ErrorSeverity::Internal,
            Self::Check(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy { .. } => "ENCOUNTER_BUSY",
            Self::UnknownAction(_) => "ENCOUNTER_UNKNOWN_ACTION",
            Self::UnknownCombatant(_) => "ENCOUNTER_UNKNOWN_COMBATANT",
            Self::Check(error) => error.error_code(),
        }
    }
}
