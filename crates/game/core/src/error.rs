//! Error classification shared by every crate of the workspace.
//!
//! Each state machine owns its error enum (`CheckError` next to
//! [`crate::check::SkillCheck`], `EncounterError` next to
//! [`crate::engine::Encounter`]). They all implement [`GameError`] so callers
//! can decide between retrying, rejecting the input, or reporting a bug
//! without matching on concrete variants.
//!
//! Losing a fight is not an error: Defeat is a terminal phase of the
//! encounter.

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The engine is mid-presentation; send `Continue` and retry.
    Recoverable,

    /// The input or content is wrong and will fail the same way again.
    ///
    /// Examples: a rule naming an action missing from the catalog
    Validation,

    /// Engine state contradicts itself.
    ///
    /// Examples: a third roll recorded on a two-check sequence
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity and a stable machine-readable code for an error.
///
/// Codes are upper snake case with a crate prefix (`CHECK_`, `ENCOUNTER_`,
/// `RUNTIME_`) and never change once published, so logs and tests can key on
/// them.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn error_code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_busy_style_errors_are_retried() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Internal.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.to_string(), "validation");
    }
}
