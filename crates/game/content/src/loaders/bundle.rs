//! Complete content set.
//!
//! A [`ContentBundle`] holds everything a session needs. The default data set
//! is compiled into the crate so the game runs without a data directory.

use game_core::{
    ActionCatalog, ActionId, ActionOracle, GameConfig, Player, ResultTier, RuleOracle, RuleTable,
    SpawnTable, TriggerType,
};
use tracing::warn;

use crate::loaders::{
    ActionLoader, ConfigLoader, LoadResult, MonsterLoader, PartyLoader, RuleLoader,
};

/// Default data files, embedded at compile time.
pub mod embedded {
    pub const CONFIG: &str = include_str!("../../data/config.toml");
    pub const ACTIONS: &str = include_str!("../../data/actions.ron");
    pub const RULES: &str = include_str!("../../data/rules.ron");
    pub const MONSTERS: &str = include_str!("../../data/monsters.ron");
    pub const PARTY: &str = include_str!("../../data/party.ron");
}

/// Gap in the content that makes part of the game silently do nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentIssue {
    /// A rule names an action that is not in the catalog.
    UnknownAction { rule: String, action: ActionId },
    /// No rule lists this (action, tier) pair.
    Uncovered { action: ActionId, tier: ResultTier },
    /// Nothing can be chosen for this trigger.
    NoActions { trigger: TriggerType },
    /// No monster type can ever spawn.
    NoMonsters,
}

impl core::fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownAction { rule, action } => {
                write!(f, "rule '{rule}' refers to unknown action '{action}'")
            }
            Self::Uncovered { action, tier } => {
                write!(f, "no rule covers '{action}' on {}", tier.as_str())
            }
            Self::NoActions { trigger } => write!(f, "no {} actions defined", trigger.as_str()),
            Self::NoMonsters => f.write_str("no monster type can spawn"),
        }
    }
}

/// Everything loaded for one session.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub actions: ActionCatalog,
    pub rules: RuleTable,
    pub spawn: SpawnTable,
    /// Starting party.
    pub party: Vec<Player>,
}

impl ContentBundle {
    /// The data set shipped with the crate.
    pub fn embedded() -> LoadResult<Self> {
        let config = ConfigLoader::parse(embedded::CONFIG)?;
        Self::embedded_with_config(config)
    }

    /// The embedded data set with a caller-supplied configuration.
    pub fn embedded_with_config(config: GameConfig) -> LoadResult<Self> {
        let party = PartyLoader::parse(embedded::PARTY, &config)?;
        Ok(Self {
            actions: ActionLoader::parse(embedded::ACTIONS)?,
            rules: RuleLoader::parse(embedded::RULES)?,
            spawn: MonsterLoader::parse(embedded::MONSTERS)?,
            party,
            config,
        })
    }

    /// Configuration gaps. Each one is also logged as a warning.
    pub fn issues(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();

        for trigger in [TriggerType::ActiveCombat, TriggerType::ReactionCombat] {
            if self.actions.available(trigger).is_empty() {
                issues.push(ContentIssue::NoActions { trigger });
            }
        }

        for rule in self.rules.rules() {
            for key in &rule.applies_to {
                if self.actions.action(&key.action).is_none() {
                    issues.push(ContentIssue::UnknownAction {
                        rule: rule.name.clone(),
                        action: key.action.clone(),
                    });
                }
            }
        }

        for action in self.actions.actions() {
            for tier in ResultTier::ALL {
                let covered = self
                    .rules
                    .rules()
                    .iter()
                    .any(|rule| rule.applies_to(&action.id, tier));
                if !covered {
                    issues.push(ContentIssue::Uncovered {
                        action: action.id.clone(),
                        tier,
                    });
                }
            }
        }

        if self
            .spawn
            .entries()
            .iter()
            .all(|entry| entry.state == game_core::SpawnState::Extinct)
        {
            issues.push(ContentIssue::NoMonsters);
        }

        for issue in &issues {
            warn!(%issue, "content gap");
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Outcome, OutcomeRule, ResultKey};

    #[test]
    fn embedded_content_loads_without_gaps() {
        let bundle = ContentBundle::embedded().unwrap();
        assert!(!bundle.actions.is_empty());
        assert!(!bundle.rules.is_empty());
        assert!(!bundle.party.is_empty());
        assert_eq!(bundle.issues(), Vec::new());
    }

    #[test]
    fn reports_unknown_and_uncovered_actions() {
        let mut bundle = ContentBundle::embedded().unwrap();
        bundle.rules = RuleTable::new(vec![OutcomeRule {
            name: "stray".into(),
            label: String::new(),
            description: String::new(),
            applies_to: vec![ResultKey::new("juggle", ResultTier::Fumble)],
            conditions: Vec::new(),
            outcomes: vec![Outcome::Nothing],
        }]);

        let issues = bundle.issues();
        assert!(issues.contains(&ContentIssue::UnknownAction {
            rule: "stray".into(),
            action: ActionId::new("juggle"),
        }));
        assert!(issues.contains(&ContentIssue::Uncovered {
            action: ActionId::new("strike"),
            tier: ResultTier::CriticalSuccess,
        }));
    }
}
