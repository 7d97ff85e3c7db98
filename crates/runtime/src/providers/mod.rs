//! Built-in decision providers.
//!
//! - [`AutoPilot`]: deterministic heuristic used by the CLI
//! - [`ScriptedProvider`]: replays a fixed list of indices (tests, replays)
mod autopilot;
mod scripted;

pub use autopilot::AutoPilot;
pub use scripted::ScriptedProvider;
