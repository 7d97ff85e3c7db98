//! Provider replaying a fixed sequence of choices.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::api::{ActionRequest, DecisionProvider, Result, RuntimeError, TargetRequest};

/// Answers action and target requests from two queues, in order.
///
/// Running out of choices is an error, so a test notices when the encounter
/// asks for more decisions than it scripted.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    actions: Mutex<VecDeque<usize>>,
    targets: Mutex<VecDeque<usize>>,
}

impl ScriptedProvider {
    pub fn new(
        actions: impl IntoIterator<Item = usize>,
        targets: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
            targets: Mutex::new(targets.into_iter().collect()),
        }
    }

    /// Choices not consumed yet, as `(actions, targets)`.
    pub async fn remaining(&self) -> (usize, usize) {
        (self.actions.lock().await.len(), self.targets.lock().await.len())
    }
}

#[async_trait]
impl DecisionProvider for ScriptedProvider {
    async fn choose_action(&self, _request: &ActionRequest<'_>) -> Result<usize> {
        self.actions
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted { kind: "action" })
    }

    async fn choose_target(&self, _request: &TargetRequest<'_>) -> Result<usize> {
        self.targets
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted { kind: "target" })
    }
}
