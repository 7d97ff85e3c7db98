//! Action catalog loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{ActionCatalog, PlayerAction};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, in_file, read_file};

/// Action catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionFile {
    pub actions: Vec<PlayerAction>,
}

/// Loader for the action catalog.
pub struct ActionLoader;

impl ActionLoader {
    /// Load the action catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an [`ActionFile`]
    pub fn load(path: &Path) -> LoadResult<ActionCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(in_file(path))
    }

    /// Parse an action catalog. Action ids must be unique.
    pub fn parse(content: &str) -> LoadResult<ActionCatalog> {
        let file: ActionFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for action in &file.actions {
            if !seen.insert(action.id.clone()) {
                anyhow::bail!("Duplicate action id '{}'", action.id);
            }
        }
        Ok(ActionCatalog::new(file.actions))
    }
}
