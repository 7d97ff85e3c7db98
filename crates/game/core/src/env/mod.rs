//! Traits describing read-only combat data.
//!
//! Oracles expose the action catalog, the outcome rule table and the random
//! source. The [`CombatEnv`] aggregate bundles them with the configuration so
//! the encounter engine can access everything it needs without hard coupling
//! to concrete implementations or ambient globals.
mod actions;
mod rng;
mod rules;

pub use actions::ActionOracle;
pub use rng::{DrawContext, PcgRng, RngOracle, SeedSequence, compute_seed};
pub use rules::RuleOracle;

use crate::config::GameConfig;

/// Aggregates read-only oracles required by the encounter engine.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    actions: &'a dyn ActionOracle,
    rules: &'a dyn RuleOracle,
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        actions: &'a dyn ActionOracle,
        rules: &'a dyn RuleOracle,
        config: &'a GameConfig,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self {
            actions,
            rules,
            config,
            rng,
        }
    }

    pub fn actions(&self) -> &'a dyn ActionOracle {
        self.actions
    }

    pub fn rules(&self) -> &'a dyn RuleOracle {
        self.rules
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("actions", &self.actions.actions().len())
            .field("rules", &self.rules.rules().len())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
