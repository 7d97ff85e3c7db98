//! Player action definitions.
//!
//! Actions are immutable, data-driven records: which attributes each of the
//! two checks rolls against, which base roll type each check starts with, and
//! the text used when presenting the action. Rules refer to actions by
//! [`ActionId`]; attribute values are always read from the combatant passed in.

use crate::check::CheckKind;
use crate::dice::RollType;
use crate::env::ActionOracle;
use crate::stats::Attribute;

/// Stable identifier of a player action (e.g. `"strike"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ActionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// When an action can be chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerType {
    /// Chosen on the player's own turn against a monster.
    ActiveCombat,
    /// Chosen by the player a monster attacks.
    ReactionCombat,
}

impl TriggerType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ActiveCombat => "active",
            Self::ReactionCombat => "reaction",
        }
    }
}

/// Immutable player action definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerAction {
    pub id: ActionId,
    pub name: String,
    pub trigger: TriggerType,

    pub success_attribute: Attribute,
    pub critical_attribute: Attribute,
    pub fumble_attribute: Attribute,

    #[cfg_attr(feature = "serde", serde(default))]
    pub success_roll: RollType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub critical_roll: RollType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fumble_roll: RollType,

    /// Prompt shown while a target is chosen (e.g. "Strike whom?").
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_prompt: String,
    /// Verb used in the action log (e.g. "strikes").
    #[cfg_attr(feature = "serde", serde(default))]
    pub verb: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl PlayerAction {
    /// Attribute the given check rolls against.
    pub fn attribute_for(&self, kind: CheckKind) -> Attribute {
        match kind {
            CheckKind::Success => self.success_attribute,
            CheckKind::Critical => self.critical_attribute,
            CheckKind::Fumble => self.fumble_attribute,
        }
    }

    /// Base roll type of the given check before banked effects are added.
    pub fn roll_hint_for(&self, kind: CheckKind) -> RollType {
        match kind {
            CheckKind::Success => self.success_roll,
            CheckKind::Critical => self.critical_roll,
            CheckKind::Fumble => self.fumble_roll,
        }
    }

    pub fn is_reaction(&self) -> bool {
        self.trigger == TriggerType::ReactionCombat
    }
}

/// In-memory action catalog, in definition order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionCatalog {
    actions: Vec<PlayerAction>,
}

impl ActionCatalog {
    pub fn new(actions: Vec<PlayerAction>) -> Self {
        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl ActionOracle for ActionCatalog {
    fn actions(&self) -> &[PlayerAction] {
        &self.actions
    }
}

impl FromIterator<PlayerAction> for ActionCatalog {
    fn from_iter<T: IntoIterator<Item = PlayerAction>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(id: &str, trigger: TriggerType) -> PlayerAction {
        PlayerAction {
            id: ActionId::new(id),
            name: id.to_string(),
            trigger,
            success_attribute: Attribute::Force,
            critical_attribute: Attribute::Reflexe,
            fumble_attribute: Attribute::Stamina,
            success_roll: RollType::Normal,
            critical_roll: RollType::Advantage,
            fumble_roll: RollType::Disadvantage,
            target_prompt: String::new(),
            verb: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn catalog_filters_by_trigger_in_order() {
        let catalog: ActionCatalog = [
            action("strike", TriggerType::ActiveCombat),
            action("parry", TriggerType::ReactionCombat),
            action("shoot", TriggerType::ActiveCombat),
        ]
        .into_iter()
        .collect();

        let active: Vec<_> = catalog
            .available(TriggerType::ActiveCombat)
            .into_iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(active, ["strike", "shoot"]);
        assert!(catalog.action(&ActionId::new("parry")).unwrap().is_reaction());
        assert!(catalog.action(&ActionId::new("flee")).is_none());
    }

    #[test]
    fn check_lookups_follow_kind() {
        let strike = action("strike", TriggerType::ActiveCombat);
        assert_eq!(strike.attribute_for(CheckKind::Critical), Attribute::Reflexe);
        assert_eq!(strike.roll_hint_for(CheckKind::Fumble), RollType::Disadvantage);
    }
}
