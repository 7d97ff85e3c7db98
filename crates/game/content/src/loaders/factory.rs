//! Content factory for building a content bundle from data files.

use std::path::{Path, PathBuf};

use game_core::{ActionCatalog, GameConfig, Player, RuleTable, SpawnTable};

use crate::loaders::{
    ActionLoader, ConfigLoader, ContentBundle, LoadResult, MonsterLoader, PartyLoader, RuleLoader,
};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actions.ron
/// ├── rules.ron
/// ├── monsters.ron
/// └── party.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const ACTIONS_FILE: &'static str = "actions.ron";
    pub const RULES_FILE: &'static str = "rules.ron";
    pub const MONSTERS_FILE: &'static str = "monsters.ron";
    pub const PARTY_FILE: &'static str = "party.ron";

    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load the action catalog from `actions.ron`.
    pub fn load_actions(&self) -> LoadResult<ActionCatalog> {
        ActionLoader::load(&self.data_dir.join(Self::ACTIONS_FILE))
    }

    /// Load the outcome rule table from `rules.ron`.
    pub fn load_rules(&self) -> LoadResult<RuleTable> {
        RuleLoader::load(&self.data_dir.join(Self::RULES_FILE))
    }

    /// Load monster types from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<SpawnTable> {
        MonsterLoader::load(&self.data_dir.join(Self::MONSTERS_FILE))
    }

    /// Load the starting party from `party.ron`.
    pub fn load_party(&self, config: &GameConfig) -> LoadResult<Vec<Player>> {
        PartyLoader::load(&self.data_dir.join(Self::PARTY_FILE), config)
    }

    /// Load every file of the data directory.
    ///
    /// A missing `config.toml` falls back to the default configuration; every
    /// other file is required.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let config_path = self.data_dir.join(Self::CONFIG_FILE);
        let config = if config_path.exists() {
            ConfigLoader::load(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            GameConfig::default()
        };
        self.load_bundle_with_config(config)
    }

    /// Load the data directory with a configuration obtained elsewhere.
    pub fn load_bundle_with_config(&self, config: GameConfig) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            actions: self.load_actions()?,
            rules: self.load_rules()?,
            spawn: self.load_monsters()?,
            party: self.load_party(&config)?,
            config,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
