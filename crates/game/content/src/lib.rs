//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the RON/TOML data files of the game:
//! - Player actions (RON)
//! - Outcome rules (RON)
//! - Monster types and their ecosystem state (RON)
//! - Starting party (RON)
//! - Game configuration (TOML)
//!
//! A default data set is embedded at compile time and exposed through
//! [`ContentBundle::embedded`]. Content is consumed by the session runtime and
//! never mutated by combat.
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, ConfigLoader, ContentBundle, ContentFactory, ContentIssue, LoadResult,
    MonsterLoader, PartyLoader, RuleLoader,
};
