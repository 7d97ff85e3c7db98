//! Combatant state.
//!
//! Players and monsters share [`CombatantState`] (attributes, health, the
//! per-cycle acted flag and the [`StatusLedger`]). The encounter engine owns
//! monsters for the duration of one fight and borrows the party.
mod combatant;
mod ledger;

pub use combatant::{
    Combatant, CombatantId, CombatantState, Monster, MonsterId, MonsterTemplate, PartySlot,
    Player,
};
pub use ledger::{LedgerScope, StatusLedger};
