//! Asynchronous abstraction for sourcing player decisions.
//!
//! Runtime users plug in [`DecisionProvider`] implementations so encounters
//! can run with human input, scripted fixtures, or an auto-pilot.
use async_trait::async_trait;
use game_core::{Monster, Player, PlayerAction, TriggerType};

use super::errors::Result;

/// A player has to pick an action.
#[derive(Debug)]
pub struct ActionRequest<'a> {
    pub actor: &'a Player,
    pub trigger: TriggerType,
    /// Offered actions; the answer indexes into this list.
    pub options: Vec<&'a PlayerAction>,
    /// The attacking monster when `trigger` is a reaction.
    pub attacker: Option<&'a Monster>,
    pub party: &'a [Player],
    pub monsters: &'a [Monster],
}

/// A player has to pick the monster an action is aimed at.
#[derive(Debug)]
pub struct TargetRequest<'a> {
    pub actor: &'a Player,
    pub action: &'a PlayerAction,
    /// Living monsters; the answer indexes into this list.
    pub options: Vec<&'a Monster>,
}

/// Trait for providing player decisions during an encounter.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Auto-pilot heuristics
/// - Scripted/replayed decisions
/// - Testing fixtures
///
/// An index outside the offered options is ignored by the engine and the
/// provider is asked again.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Pick an action (active or reaction) for the requesting player.
    async fn choose_action(&self, request: &ActionRequest<'_>) -> Result<usize>;

    /// Pick the target of an active action.
    async fn choose_target(&self, request: &TargetRequest<'_>) -> Result<usize>;
}
