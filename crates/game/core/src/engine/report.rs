use crate::action::{ActionId, TriggerType};
use crate::check::{CheckRecord, ResultTier};
use crate::rules::{AppliedOutcome, Outcome};
use crate::state::{CombatantId, MonsterId, PartySlot};

use super::Side;

/// Everything one resolved action did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    pub actor: PartySlot,
    pub action: ActionId,
    pub trigger: TriggerType,
    pub target: MonsterId,
    /// The two checks, in roll order.
    pub checks: Vec<CheckRecord>,
    pub tier: ResultTier,
    /// Deduplicated outcomes of every matching rule.
    pub outcomes: Vec<Outcome>,
    pub applied: Vec<AppliedOutcome>,
    /// Monsters killed and removed by this action.
    pub defeated: Vec<MonsterId>,
    /// Party members brought to 0 health by this action.
    pub fallen: Vec<PartySlot>,
}

impl ActionReport {
    /// True when no rule matched the action and tier.
    pub fn had_no_effect(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Something that happened while the encounter advanced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterEvent {
    /// Every living combatant of a side had acted; their flags were reset.
    CycleReset { side: Side },
    TurnStarted { actor: CombatantId },
    /// The player must pick one of `options` (catalog ids, in order).
    ActionRequested {
        actor: PartySlot,
        trigger: TriggerType,
        options: Vec<ActionId>,
    },
    ActionChosen { actor: PartySlot, action: ActionId },
    /// The player must pick one of the living monsters in `options`.
    TargetRequested {
        actor: PartySlot,
        action: ActionId,
        options: Vec<MonsterId>,
    },
    /// No action was available for the trigger; the turn ends without effect.
    TurnPassed { actor: CombatantId },
    MonsterStunned { monster: MonsterId },
    MonsterAttacks { monster: MonsterId, target: PartySlot },
    /// The attacked player had no reaction to offer.
    UndefendedHit {
        monster: MonsterId,
        target: PartySlot,
        damage: u8,
    },
    ActionResolved(ActionReport),
    Victory,
    Defeat,
}
