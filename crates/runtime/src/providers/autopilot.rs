//! Heuristic provider that plays the party's strengths.

use async_trait::async_trait;
use game_core::Combatant;

use crate::api::{ActionRequest, DecisionProvider, Result, RuntimeError, TargetRequest};

/// Picks the action whose success attribute is the actor's best, and aims at
/// the weakest living monster. Ties go to the earlier option.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoPilot;

impl AutoPilot {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DecisionProvider for AutoPilot {
    async fn choose_action(&self, request: &ActionRequest<'_>) -> Result<usize> {
        let attributes = &request.actor.state.attributes;
        request
            .options
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, action)| attributes.get(action.success_attribute))
            .map(|(index, _)| index)
            .ok_or(RuntimeError::NoOptions {
                actor: request.actor.slot,
            })
    }

    async fn choose_target(&self, request: &TargetRequest<'_>) -> Result<usize> {
        request
            .options
            .iter()
            .enumerate()
            .filter(|(_, monster)| monster.is_alive())
            .min_by_key(|(_, monster)| monster.state.health.current())
            .map(|(index, _)| index)
            .ok_or(RuntimeError::NoOptions {
                actor: request.actor.slot,
            })
    }
}
