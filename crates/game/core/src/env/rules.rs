//! Outcome rule oracle.

use crate::rules::OutcomeRule;

/// Oracle providing the outcome rule table.
///
/// The table is queried, never mutated, during resolution.
pub trait RuleOracle: Send + Sync {
    fn rules(&self) -> &[OutcomeRule];
}
