//! Data-driven outcome rules.
//!
//! A rule lists the (action, tier) pairs it responds to, the conditions that
//! must all hold, and the outcomes it contributes. Resolution applies the
//! deduplicated union of every matching rule's outcomes.
//!
//! - `condition`: predicates over [`CombatContext`]
//! - `table`: rule records and matching
//! - `apply`: outcome dispatch onto the battlefield
mod apply;
mod condition;
mod context;
mod outcome;
mod table;

pub use apply::{AppliedOutcome, Battlefield, Missing, OutcomeTargets, apply_outcome};
pub use condition::Condition;
pub use context::CombatContext;
pub use outcome::Outcome;
pub use table::{
    OutcomeRule, ResultKey, RuleTable, find_applicable_outcomes, find_applicable_rules,
};
