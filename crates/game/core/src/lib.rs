//! Deterministic combat rules for Gutter Knight.
//!
//! `game-core` defines the canonical combat resolution (dice, advantage,
//! skill checks, outcome rules, turn scheduling) and exposes pure APIs that
//! can be reused by the session runtime and offline tools. All encounter
//! state mutation flows through [`engine::Encounter`], and supporting crates
//! depend on the types re-exported here.
pub mod action;
pub mod check;
pub mod config;
pub mod dice;
pub mod engine;
pub mod env;
pub mod error;
pub mod rules;
pub mod spawn;
pub mod state;
pub mod stats;

pub use action::{ActionCatalog, ActionId, PlayerAction, TriggerType};
pub use check::{CheckError, CheckKind, CheckRecord, CheckStage, ResultTier, SkillCheck};
pub use config::{CombatConfig, EncounterRules, GameConfig};
pub use dice::{
    AdvantageCounts, DiceRoller, DigitDraw, DigitPair, ResolvedRoll, RollType, resolve_advantage,
};
pub use engine::{
    ActionReport, Encounter, EncounterError, EncounterEvent, EncounterInput, EncounterPhase,
    Side, Step, WaitReason,
};
pub use env::{
    ActionOracle, CombatEnv, DrawContext, PcgRng, RngOracle, RuleOracle, SeedSequence,
    compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use rules::{
    AppliedOutcome, Battlefield, CombatContext, Condition, Missing, Outcome, OutcomeRule,
    OutcomeTargets, ResultKey, RuleTable, apply_outcome, find_applicable_outcomes,
    find_applicable_rules,
};
pub use spawn::{EcosystemStatus, SpawnAnnouncement, SpawnEntry, SpawnState, SpawnTable};
pub use state::{
    Combatant, CombatantId, CombatantState, LedgerScope, Monster, MonsterId, MonsterTemplate,
    PartySlot, Player, StatusLedger,
};
pub use stats::{Attribute, AttributeSet, HealthMeter, Lesson, Mentor, upgrade_value};
