//! Two-stage skill checks.
//!
//! Every action resolves with exactly two checks. The success check decides
//! which second check follows: a passed success check is followed by a
//! critical check, a failed one by a fumble check.
//!
//! ```text
//! AwaitingSuccess ──pass──▶ AwaitingCriticalOrFumble{success: true}  ──▶ Resolved(CriticalSuccess | PartlySuccess)
//!                 └─fail──▶ AwaitingCriticalOrFumble{success: false} ──▶ Resolved(Fumble | PartlyFailure)
//! ```

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::dice::{AdvantageCounts, ResolvedRoll};
use crate::error::{ErrorSeverity, GameError};
use crate::stats::Attribute;

/// Which of the three possible checks is being rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckKind {
    Success,
    Critical,
    Fumble,
}

impl CheckKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Critical => "critical",
            Self::Fumble => "fumble",
        }
    }
}

/// Four-way result of a two-stage check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResultTier {
    CriticalSuccess,
    PartlySuccess,
    PartlyFailure,
    Fumble,
}

impl ResultTier {
    pub const ALL: [Self; 4] = [
        Self::CriticalSuccess,
        Self::PartlySuccess,
        Self::PartlyFailure,
        Self::Fumble,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalSuccess => "critical success",
            Self::PartlySuccess => "partial success",
            Self::PartlyFailure => "partial failure",
            Self::Fumble => "fumble",
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::CriticalSuccess | Self::PartlySuccess)
    }
}

/// Where a skill check currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckStage {
    AwaitingSuccess,
    AwaitingCriticalOrFumble { success: bool },
    Resolved(ResultTier),
}

/// One rolled check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckRecord {
    pub kind: CheckKind,
    pub attribute: Attribute,
    /// Attribute value the roll had to meet or beat.
    pub target: u8,
    /// Stacks consumed for this check.
    pub counts: AdvantageCounts,
    pub roll: ResolvedRoll,
    pub passed: bool,
}

/// Errors raised by [`SkillCheck`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("skill check already resolved as {tier:?}")]
    AlreadyResolved { tier: ResultTier },

    #[error("skill check not resolved yet (stage {stage:?})")]
    Unresolved { stage: CheckStage },
}

impl GameError for CheckError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyResolved { .. } => "CHECK_ALREADY_RESOLVED",
            Self::Unresolved { .. } => "CHECK_UNRESOLVED",
        }
    }
}

/// Skill check state machine for one action resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillCheck {
    stage: CheckStage,
    records: ArrayVec<CheckRecord, { GameConfig::CHECKS_PER_ACTION }>,
}

impl SkillCheck {
    pub fn new() -> Self {
        Self {
            stage: CheckStage::AwaitingSuccess,
            records: ArrayVec::new(),
        }
    }

    pub fn stage(&self) -> CheckStage {
        self.stage
    }

    /// The check that must be rolled next, or `None` once resolved.
    pub fn pending(&self) -> Option<CheckKind> {
        match self.stage {
            CheckStage::AwaitingSuccess => Some(CheckKind::Success),
            CheckStage::AwaitingCriticalOrFumble { success: true } => Some(CheckKind::Critical),
            CheckStage::AwaitingCriticalOrFumble { success: false } => Some(CheckKind::Fumble),
            CheckStage::Resolved(_) => None,
        }
    }

    /// Records the roll for the pending check and advances the stage.
    ///
    /// # Arguments
    ///
    /// * `attribute` - Attribute the pending check rolls against
    /// * `target` - The combatant's value for that attribute
    /// * `roll` - Resolved roll (advantage already applied)
    pub fn record(
        &mut self,
        attribute: Attribute,
        target: u8,
        roll: ResolvedRoll,
    ) -> Result<CheckStage, CheckError> {
        let kind = match self.stage {
            CheckStage::AwaitingSuccess => CheckKind::Success,
            CheckStage::AwaitingCriticalOrFumble { success: true } => CheckKind::Critical,
            CheckStage::AwaitingCriticalOrFumble { success: false } => CheckKind::Fumble,
            CheckStage::Resolved(tier) => return Err(CheckError::AlreadyResolved { tier }),
        };

        let passed = roll.value <= target;
        self.records.push(CheckRecord {
            kind,
            attribute,
            target,
            counts: roll.counts,
            roll,
            passed,
        });

        self.stage = match (kind, passed) {
            (CheckKind::Success, success) => CheckStage::AwaitingCriticalOrFumble { success },
            (CheckKind::Critical, true) => CheckStage::Resolved(ResultTier::CriticalSuccess),
            (CheckKind::Critical, false) => CheckStage::Resolved(ResultTier::PartlySuccess),
            (CheckKind::Fumble, true) => CheckStage::Resolved(ResultTier::Fumble),
            (CheckKind::Fumble, false) => CheckStage::Resolved(ResultTier::PartlyFailure),
        };
        Ok(self.stage)
    }

    pub fn tier(&self) -> Option<ResultTier> {
        match self.stage {
            CheckStage::Resolved(tier) => Some(tier),
            _ => None,
        }
    }

    /// Final tier. Fails while a check is still pending.
    pub fn finish(&self) -> Result<ResultTier, CheckError> {
        self.tier().ok_or(CheckError::Unresolved { stage: self.stage })
    }

    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }
}

impl Default for SkillCheck {
    fn default() -> Self {
        Self::new()
    }
}
