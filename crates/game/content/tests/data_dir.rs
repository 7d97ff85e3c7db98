//! Loading content from a data directory on disk.

use std::fs;
use std::path::Path;

use game_content::loaders::bundle::embedded;
use game_content::{ContentBundle, ContentFactory};
use game_core::{ActionOracle, RuleOracle, SpawnState};

fn write_default_data(dir: &Path) {
    fs::write(dir.join(ContentFactory::CONFIG_FILE), embedded::CONFIG).unwrap();
    fs::write(dir.join(ContentFactory::ACTIONS_FILE), embedded::ACTIONS).unwrap();
    fs::write(dir.join(ContentFactory::RULES_FILE), embedded::RULES).unwrap();
    fs::write(dir.join(ContentFactory::MONSTERS_FILE), embedded::MONSTERS).unwrap();
    fs::write(dir.join(ContentFactory::PARTY_FILE), embedded::PARTY).unwrap();
}

#[test]
fn data_directory_matches_embedded_content() {
    let dir = tempfile::tempdir().unwrap();
    write_default_data(dir.path());

    let loaded = ContentFactory::new(dir.path()).load_bundle().unwrap();
    let embedded = ContentBundle::embedded().unwrap();

    assert_eq!(loaded.config, embedded.config);
    assert_eq!(loaded.actions.actions(), embedded.actions.actions());
    assert_eq!(loaded.rules.rules(), embedded.rules.rules());
    assert_eq!(loaded.spawn, embedded.spawn);
    assert_eq!(loaded.party, embedded.party);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_default_data(dir.path());
    fs::remove_file(dir.path().join(ContentFactory::CONFIG_FILE)).unwrap();

    let bundle = ContentFactory::new(dir.path()).load_bundle().unwrap();
    assert_eq!(bundle.config, game_core::GameConfig::default());
}

#[test]
fn config_damage_reaches_party_without_explicit_damage() {
    let dir = tempfile::tempdir().unwrap();
    write_default_data(dir.path());
    fs::write(
        dir.path().join(ContentFactory::CONFIG_FILE),
        "[combat]\nplayer_damage = 4\n",
    )
    .unwrap();

    let bundle = ContentFactory::new(dir.path()).load_bundle().unwrap();
    // Brannoc has an explicit damage value; the others use the configured one.
    assert_eq!(bundle.party[0].damage, 2);
    assert!(bundle.party[1..].iter().all(|player| player.damage == 4));
}

#[test]
fn malformed_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    write_default_data(dir.path());
    fs::write(dir.path().join(ContentFactory::RULES_FILE), "(rules: [oops])").unwrap();

    let err = ContentFactory::new(dir.path()).load_bundle().unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("rules.ron"), "{message}");
    assert!(message.contains("Failed to parse rule table RON"), "{message}");
}

#[test]
fn embedded_ecosystem_starts_with_wandering_types() {
    let bundle = ContentBundle::embedded().unwrap();
    assert!(
        bundle
            .spawn
            .entries()
            .iter()
            .any(|entry| entry.state == SpawnState::Wandering)
    );
}
