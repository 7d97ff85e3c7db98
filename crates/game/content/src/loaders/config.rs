//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, in_file, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load game configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    ///
    /// # Returns
    ///
    /// Returns a GameConfig.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(in_file(path))
    }

    /// Parse configuration. Missing tables and keys keep their defaults.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("[encounters]\nmax_monsters = 3\n").unwrap();
        assert_eq!(config.encounters.max_monsters, 3);
        assert_eq!(config.encounters.max_types, 3);
        assert_eq!(config.combat, game_core::CombatConfig::default());
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn unknown_types_are_errors() {
        assert!(ConfigLoader::parse("[combat]\nheal_amount = \"lots\"\n").is_err());
    }
}
