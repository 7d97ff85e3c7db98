//! Starting party loader.

use std::path::Path;

use game_core::{AttributeSet, GameConfig, PartySlot, Player};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, in_file, read_file};

/// One party member as written in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyMemberSpec {
    pub name: String,
    #[serde(default)]
    pub attributes: AttributeSet,
    #[serde(default = "PartyMemberSpec::default_health")]
    pub max_health: u8,
    /// Falls back to the configured player damage when absent.
    #[serde(default)]
    pub damage: Option<u8>,
}

impl PartyMemberSpec {
    fn default_health() -> u8 {
        GameConfig::MAX_HEALTH
    }
}

/// Party structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyFile {
    pub members: Vec<PartyMemberSpec>,
}

/// Loader for the starting party.
pub struct PartyLoader;

impl PartyLoader {
    /// Load the party from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a [`PartyFile`]
    /// * `config` - Supplies the default player damage
    pub fn load(path: &Path, config: &GameConfig) -> LoadResult<Vec<Player>> {
        let content = read_file(path)?;
        Self::parse(&content, config).map_err(in_file(path))
    }

    /// Parse a party. Slots are assigned in file order.
    pub fn parse(content: &str, config: &GameConfig) -> LoadResult<Vec<Player>> {
        let file: PartyFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON: {}", e))?;

        if file.members.is_empty() {
            anyhow::bail!("Party has no members");
        }
        if file.members.len() > GameConfig::MAX_PARTY {
            anyhow::bail!(
                "Party has {} members, at most {} are allowed",
                file.members.len(),
                GameConfig::MAX_PARTY
            );
        }

        let players = file
            .members
            .into_iter()
            .enumerate()
            .map(|(index, member)| {
                Player::new(
                    PartySlot(index as u8),
                    member.name,
                    member.attributes.normalized(),
                    member.max_health,
                )
                .with_damage(member.damage.unwrap_or(config.combat.player_damage))
            })
            .collect();
        Ok(players)
    }
}
