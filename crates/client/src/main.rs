//! Gutter Knight client binary.
//!
//! Auto-plays encounters over the embedded or a custom content set.
//!
//! # Examples
//!
//! ```bash
//! # Three encounters, resting between victories
//! cargo run -p dungeon-client -- --encounters 3 --rest-between
//!
//! # Replayable run with custom content, as JSON lines
//! GUTTER_SEED=42 cargo run -p dungeon-client -- --data-dir ./data --json
//! ```

use anyhow::Result;
use clap::Parser;
use dungeon_client::{Cli, ClientConfig, Narrator, train_party};
use runtime::{Event, EventBus, Session, SessionConfig, Topic};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Every event of one encounter must fit; lagging receivers lose events.
const EVENT_BUFFER: usize = 4096;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::resolve(Cli::parse());
    run(config).await
}

async fn run(config: ClientConfig) -> Result<()> {
    let content = config.load_content()?;
    let session_config = match config.seed {
        Some(seed) => SessionConfig::with_seed(seed),
        None => SessionConfig::with_random_seed(),
    };
    tracing::info!(
        seed = session_config.seed,
        encounters = config.encounters,
        "Starting Gutter Knight session"
    );

    let events = EventBus::with_capacity(EVENT_BUFFER);
    let mut session_rx = events.subscribe(Topic::Session);
    let mut encounter_rx = events.subscribe(Topic::Encounter);
    let mut narrator = Narrator::new(&content.party, config.json);
    let mut session = Session::builder()
        .content(content)
        .config(SessionConfig {
            event_buffer_size: EVENT_BUFFER,
            ..session_config
        })
        .events(events)
        .build()?;

    train_party(&mut session, &config.mentors)?;
    drain(&mut session_rx, &mut narrator)?;

    for remaining in (0..config.encounters).rev() {
        let summary = session.run_encounter().await?;

        // EncounterStarted first, so monster names are known.
        print_next(&mut session_rx, &mut narrator)?;
        drain(&mut encounter_rx, &mut narrator)?;
        drain(&mut session_rx, &mut narrator)?;

        if !session.party_alive() {
            break;
        }
        if config.rest_between && remaining > 0 {
            session.rest();
            drain(&mut session_rx, &mut narrator)?;
        }
        tracing::debug!(
            index = summary.index,
            actions = summary.actions,
            "encounter summary"
        );
    }

    tracing::info!(
        day = session.day(),
        encounters = session.encounters_fought(),
        survivors = session.party().iter().filter(|p| p.state.health.is_alive()).count(),
        "Session complete"
    );
    Ok(())
}

/// Prints the next queued event, if any. Returns false when none was queued.
fn print_next(rx: &mut broadcast::Receiver<Event>, narrator: &mut Narrator) -> Result<bool> {
    loop {
        match rx.try_recv() {
            Ok(event) => {
                if let Some(line) = narrator.render(&event)? {
                    println!("{line}");
                }
                return Ok(true);
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "event output fell behind");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => return Ok(false),
        }
    }
}

fn drain(rx: &mut broadcast::Receiver<Event>, narrator: &mut Narrator) -> Result<()> {
    while print_next(rx, narrator)? {}
    Ok(())
}
