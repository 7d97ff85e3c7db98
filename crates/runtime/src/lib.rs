//! Session runtime for Gutter Knight.
//!
//! This crate strings encounters into a session: it spawns monsters from the
//! ecosystem, feeds the encounter engine with decisions from a pluggable
//! provider, publishes everything that happens on an event bus, and handles
//! resting, day progression and mentor training between fights.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the driver and its builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`providers`] ships the built-in decision providers
pub mod api;
pub mod events;
pub mod providers;
pub mod session;

pub use api::{ActionRequest, DecisionProvider, Result, RuntimeError, TargetRequest};
pub use events::{EncounterOutcome, Event, EventBus, SessionEvent, Topic};
pub use providers::{AutoPilot, ScriptedProvider};
pub use session::{EncounterSummary, Session, SessionBuilder, SessionConfig};
