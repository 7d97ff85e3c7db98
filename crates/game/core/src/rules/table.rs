use tracing::debug;

use crate::action::ActionId;
use crate::check::ResultTier;
use crate::env::RuleOracle;

use super::condition::Condition;
use super::context::CombatContext;
use super::outcome::Outcome;

/// An (action, tier) pair a rule responds to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultKey {
    pub action: ActionId,
    pub tier: ResultTier,
}

impl ResultKey {
    pub fn new(action: impl Into<ActionId>, tier: ResultTier) -> Self {
        Self {
            action: action.into(),
            tier,
        }
    }
}

/// One row of the outcome table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeRule {
    pub name: String,
    /// Short text shown when the rule fires.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub applies_to: Vec<ResultKey>,
    /// All must hold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
    pub outcomes: Vec<Outcome>,
}

impl OutcomeRule {
    pub fn applies_to(&self, action: &ActionId, tier: ResultTier) -> bool {
        self.applies_to
            .iter()
            .any(|key| &key.action == action && key.tier == tier)
    }

    pub fn conditions_hold(&self, ctx: &CombatContext<'_>) -> bool {
        self.conditions.iter().all(|condition| condition.evaluate(ctx))
    }
}

/// In-memory outcome table, in definition order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<OutcomeRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<OutcomeRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleOracle for RuleTable {
    fn rules(&self) -> &[OutcomeRule] {
        &self.rules
    }
}

impl FromIterator<OutcomeRule> for RuleTable {
    fn from_iter<T: IntoIterator<Item = OutcomeRule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Rules that fire for `(action, tier)` under `ctx`, in table order.
pub fn find_applicable_rules<'r>(
    rules: &'r dyn RuleOracle,
    action: &ActionId,
    tier: ResultTier,
    ctx: &CombatContext<'_>,
) -> Vec<&'r OutcomeRule> {
    rules
        .rules()
        .iter()
        .filter(|rule| rule.applies_to(action, tier) && rule.conditions_hold(ctx))
        .collect()
}

/// Union of the outcomes of every applicable rule.
///
/// Each outcome appears once, at the position of its first occurrence. An
/// empty result means the table has no entry for this combination.
///
/// # Arguments
///
/// * `rules` - Outcome table
/// * `action` - Resolved action
/// * `tier` - Tier the skill check produced
/// * `ctx` - Context the rule conditions are evaluated against
pub fn find_applicable_outcomes(
    rules: &dyn RuleOracle,
    action: &ActionId,
    tier: ResultTier,
    ctx: &CombatContext<'_>,
) -> Vec<Outcome> {
    let mut outcomes: Vec<Outcome> = Vec::new();
    for rule in find_applicable_rules(rules, action, tier, ctx) {
        debug!(rule = %rule.name, action = %action, tier = tier.as_str(), "rule applies");
        for outcome in &rule.outcomes {
            if !outcomes.contains(outcome) {
                outcomes.push(*outcome);
            }
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LedgerScope, PartySlot, Player};
    use crate::stats::AttributeSet;

    fn rule(name: &str, tier: ResultTier, conditions: Vec<Condition>, outcomes: Vec<Outcome>) -> OutcomeRule {
        OutcomeRule {
            name: name.to_string(),
            label: String::new(),
            description: String::new(),
            applies_to: vec![ResultKey::new("strike", tier)],
            conditions,
            outcomes,
        }
    }

    fn table() -> RuleTable {
        RuleTable::new(vec![
            rule(
                "clean hit",
                ResultTier::CriticalSuccess,
                vec![],
                vec![Outcome::DealDoubleDamage, Outcome::GainAdvantage(LedgerScope::Attack)],
            ),
            rule(
                "last stand",
                ResultTier::CriticalSuccess,
                vec![Condition::PlayerAlone],
                vec![Outcome::DealTripleDamage, Outcome::DealDoubleDamage],
            ),
            rule(
                "crowded",
                ResultTier::CriticalSuccess,
                vec![Condition::MultipleEnemies, Condition::PlayerAlone],
                vec![Outcome::TauntAllEnemies],
            ),
        ])
    }

    #[test]
    fn union_is_deduplicated_in_first_seen_order() {
        let actor = Player::new(PartySlot(0), "Knight", AttributeSet::default(), 10);
        let ctx = CombatContext {
            actor: &actor,
            target: None,
            enemy_count: 1,
            ally_count: 1,
        };
        let table = table();
        let action = ActionId::new("strike");

        let outcomes = find_applicable_outcomes(&table, &action, ResultTier::CriticalSuccess, &ctx);
        assert_eq!(
            outcomes,
            [
                Outcome::DealDoubleDamage,
                Outcome::GainAdvantage(LedgerScope::Attack),
                Outcome::DealTripleDamage,
            ]
        );
        assert_eq!(
            find_applicable_outcomes(&table, &action, ResultTier::CriticalSuccess, &ctx),
            outcomes
        );
    }

    #[test]
    fn unmatched_combination_is_empty() {
        let actor = Player::new(PartySlot(0), "Knight", AttributeSet::default(), 10);
        let ctx = CombatContext {
            actor: &actor,
            target: None,
            enemy_count: 3,
            ally_count: 2,
        };
        let table = table();
        assert!(
            find_applicable_outcomes(&table, &ActionId::new("strike"), ResultTier::Fumble, &ctx)
                .is_empty()
        );
        assert!(
            find_applicable_outcomes(&table, &ActionId::new("parry"), ResultTier::CriticalSuccess, &ctx)
                .is_empty()
        );
    }
}
