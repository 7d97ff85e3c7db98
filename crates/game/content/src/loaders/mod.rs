//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON or TOML document into the game-core type the
//! encounter engine consumes. `parse` works on an in-memory string, `load` on a
//! file path and adds the path to any error.

pub mod actions;
pub mod bundle;
pub mod config;
pub mod factory;
pub mod monsters;
pub mod party;
pub mod rules;

pub use actions::{ActionFile, ActionLoader};
pub use bundle::{ContentBundle, ContentIssue};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use monsters::{MonsterFile, MonsterLoader};
pub use party::{PartyFile, PartyLoader, PartyMemberSpec};
pub use rules::{RuleFile, RuleLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Attaches the file path to a parse error.
pub(crate) fn in_file(path: &Path) -> impl FnOnce(anyhow::Error) -> anyhow::Error + '_ {
    move |e| e.context(format!("while loading {}", path.display()))
}
