//! Public API surface of the runtime.
//!
//! Re-exports the error type and the decision provider abstraction clients
//! implement to drive encounters.
mod errors;
mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{ActionRequest, DecisionProvider, TargetRequest};
