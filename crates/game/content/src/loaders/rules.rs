//! Outcome rule table loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{OutcomeRule, RuleTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, in_file, read_file};

/// Rule table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFile {
    pub rules: Vec<OutcomeRule>,
}

/// Loader for the outcome rule table.
pub struct RuleLoader;

impl RuleLoader {
    pub fn load(path: &Path) -> LoadResult<RuleTable> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(in_file(path))
    }

    /// Parse a rule table. Rule names must be unique and every rule must
    /// respond to at least one (action, tier) pair.
    pub fn parse(content: &str) -> LoadResult<RuleTable> {
        let file: RuleFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rule table RON: {}", e))?;

        let mut seen = HashSet::new();
        for rule in &file.rules {
            if !seen.insert(rule.name.as_str()) {
                anyhow::bail!("Duplicate rule name '{}'", rule.name);
            }
            if rule.applies_to.is_empty() {
                anyhow::bail!("Rule '{}' does not apply to any action result", rule.name);
            }
        }
        Ok(RuleTable::new(file.rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Condition, LedgerScope, Outcome, ResultTier, RuleOracle};

    #[test]
    fn parses_conditions_and_scoped_outcomes() {
        let table = RuleLoader::parse(
            r#"(rules: [(
                name: "dodge_fumble",
                applies_to: [(action: "dodge", tier: Fumble)],
                conditions: [PlayerInjured],
                outcomes: [TakeDamage, GainDisadvantage(Attack)],
            )])"#,
        )
        .unwrap();

        let rule = &table.rules()[0];
        assert_eq!(rule.applies_to[0].tier, ResultTier::Fumble);
        assert_eq!(rule.conditions, vec![Condition::PlayerInjured]);
        assert_eq!(
            rule.outcomes,
            vec![
                Outcome::TakeDamage,
                Outcome::GainDisadvantage(LedgerScope::Attack)
            ]
        );
        assert!(rule.label.is_empty());
    }

    #[test]
    fn rejects_rules_without_keys() {
        let err = RuleLoader::parse(r#"(rules: [(name: "idle", applies_to: [], outcomes: [Nothing])])"#)
            .unwrap_err();
        assert!(err.to_string().contains("'idle'"));
    }
}
