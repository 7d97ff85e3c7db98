//! Client configuration: command-line arguments layered over the environment.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_content::{ConfigLoader, ContentBundle, ContentFactory};
use game_core::GameConfig;

/// Auto-plays Gutter Knight encounters and prints what happens.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dungeon")]
#[command(about = "Auto-play Gutter Knight encounters", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Session seed; random when neither this nor GUTTER_SEED is set
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of encounters to play
    #[arg(long, default_value_t = 1)]
    pub encounters: u32,

    /// Content directory (actions.ron, rules.ron, monsters.ron, party.ron)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Game configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rest after every victory
    #[arg(long)]
    pub rest_between: bool,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,

    /// Mentor archetype training the party before the first encounter (repeatable)
    #[arg(long = "mentor", value_name = "ARCHETYPE")]
    pub mentors: Vec<String>,
}

/// Resolved client settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub seed: Option<u64>,
    pub encounters: u32,
    pub data_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub rest_between: bool,
    pub json: bool,
    pub mentors: Vec<String>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GUTTER_SEED` - Session seed (default: random)
    /// - `GUTTER_DATA_DIR` - Content directory (default: embedded content)
    /// - `GUTTER_CONFIG` - Game configuration file (default: platform config dir)
    pub fn from_env() -> Self {
        Self {
            seed: read_env::<u64>("GUTTER_SEED"),
            encounters: 1,
            data_dir: env::var("GUTTER_DATA_DIR").ok().map(PathBuf::from),
            config_path: env::var("GUTTER_CONFIG").ok().map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Command-line values win over the environment.
    pub fn resolve(cli: Cli) -> Self {
        Self::from_env().with_cli(cli)
    }

    fn with_cli(self, cli: Cli) -> Self {
        Self {
            seed: cli.seed.or(self.seed),
            encounters: cli.encounters,
            data_dir: cli.data_dir.or(self.data_dir),
            config_path: cli.config.or(self.config_path),
            rest_between: cli.rest_between,
            json: cli.json,
            mentors: cli.mentors,
        }
    }

    /// Game configuration from the explicit path, else from the platform
    /// config directory when a file exists there.
    ///
    /// `None` leaves the choice to the content source.
    pub fn load_game_config(&self) -> Result<Option<GameConfig>> {
        let path = match &self.config_path {
            Some(path) => path.clone(),
            None => match default_config_path().filter(|path| path.is_file()) {
                Some(path) => path,
                None => return Ok(None),
            },
        };
        tracing::info!("Loading game configuration from {}", path.display());
        ConfigLoader::load(&path).map(Some)
    }

    /// Loads content from the data directory, or the embedded set.
    pub fn load_content(&self) -> Result<ContentBundle> {
        let game_config = self.load_game_config()?;
        match (&self.data_dir, game_config) {
            (Some(dir), Some(config)) => ContentFactory::new(dir).load_bundle_with_config(config),
            (Some(dir), None) => ContentFactory::new(dir).load_bundle(),
            (None, Some(config)) => ContentBundle::embedded_with_config(config),
            (None, None) => ContentBundle::embedded(),
        }
        .context("Failed to load game content")
    }
}

/// `config.toml` in the platform config directory.
///
/// - Linux: `~/.config/gutter-knight/config.toml`
/// - macOS: `~/Library/Application Support/gutter-knight/config.toml`
/// - Windows: `%APPDATA%\gutter-knight\config\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "gutter-knight")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
