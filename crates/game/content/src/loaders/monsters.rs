//! Monster ecosystem loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{SpawnEntry, SpawnTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, in_file, read_file};

/// Monster catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsterFile {
    pub monsters: Vec<SpawnEntry>,
}

/// Loader for monster types and their initial spawn states.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<SpawnTable> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(in_file(path))
    }

    /// Parse a monster catalog. Names must be unique and non-empty.
    pub fn parse(content: &str) -> LoadResult<SpawnTable> {
        let file: MonsterFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for entry in &file.monsters {
            let name = entry.name();
            if name.trim().is_empty() {
                anyhow::bail!("Monster with an empty name");
            }
            if !seen.insert(name) {
                anyhow::bail!("Duplicate monster '{}'", name);
            }
            if entry.template.max_health == 0 {
                anyhow::bail!("Monster '{}' has no health", name);
            }
        }
        Ok(SpawnTable::new(file.monsters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::SpawnState;

    #[test]
    fn missing_fields_use_defaults() {
        let table = MonsterLoader::parse(
            r#"(monsters: [(template: (name: "Rat", attributes: (force: 20)))])"#,
        )
        .unwrap();

        let rat = table.entry("Rat").unwrap();
        assert_eq!(rat.state, SpawnState::Waiting);
        assert_eq!(rat.day_threshold, 1);
        assert_eq!(rat.normal_weight, 100);
        assert_eq!(rat.rare_weight, 30);
        assert_eq!(rat.template.max_health, 5);
        assert_eq!(rat.template.damage, None);
        assert_eq!(rat.template.attributes.force, 20);
        assert_eq!(rat.template.attributes.heart, 50);
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = MonsterLoader::parse(
            r#"(monsters: [(template: (name: "Rat")), (template: (name: "Rat"))])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate monster 'Rat'"));
    }
}
