//! Action catalog oracle.
//!
//! Provides access to the immutable player action definitions.

use crate::action::{ActionId, PlayerAction, TriggerType};

/// Oracle providing player action definitions.
///
/// Definitions are loaded from RON data files and never mutated at runtime.
pub trait ActionOracle: Send + Sync {
    /// Returns every known action in catalog order.
    fn actions(&self) -> &[PlayerAction];

    /// Looks up an action by id.
    fn action(&self, id: &ActionId) -> Option<&PlayerAction> {
        self.actions().iter().find(|action| &action.id == id)
    }

    /// Returns the actions offered for the given trigger, in catalog order.
    fn available(&self, trigger: TriggerType) -> Vec<&PlayerAction> {
        self.actions()
            .iter()
            .filter(|action| action.trigger == trigger)
            .collect()
    }
}
