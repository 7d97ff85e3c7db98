//! Encounter state machine.
//!
//! The [`Encounter`] is the authoritative reducer for one fight. It borrows
//! the party, owns the spawned monsters, and advances only when the caller
//! feeds it an [`EncounterInput`]. Every pause point is an explicit
//! [`EncounterPhase`]:
//!
//! ```text
//! Waiting(EncounterStart) ─Continue─▶ player turn ─▶ SelectingAction ─▶ SelectingTarget ─▶ resolve
//!        ▲                                                                                 │
//!        └──────── Waiting(TurnEnded{next}) ◀── reaction ◀── SelectingReaction ◀── monster turn
//! ```
//!
//! Victory and Defeat are terminal. Inputs that do not fit the current phase
//! are ignored; selecting while the engine waits for `Continue` is `Busy`.

mod errors;
mod report;
mod resolve;
mod turns;

pub use errors::EncounterError;
pub use report::{ActionReport, EncounterEvent};

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::action::{ActionId, TriggerType};
use crate::config::GameConfig;
use crate::dice::DiceRoller;
use crate::env::{CombatEnv, SeedSequence};
use crate::state::{Combatant, CombatantId, Monster, MonsterId, PartySlot, Player};

/// Either side of the fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Players,
    Monsters,
}

/// Why the engine is waiting for `Continue`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaitReason {
    EncounterStart,
    /// A turn finished and its result is being presented.
    TurnEnded { next: Side },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterPhase {
    Waiting(WaitReason),
    /// A player picks an active action.
    SelectingAction { actor: PartySlot },
    /// A player picks the monster the chosen action is aimed at.
    SelectingTarget { actor: PartySlot, action: ActionId },
    /// An attacked player picks a reaction.
    SelectingReaction { actor: PartySlot, attacker: MonsterId },
    Victory,
    Defeat,
}

impl EncounterPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Input the caller feeds the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncounterInput {
    Continue,
    /// Index into the options of the last `ActionRequested` event.
    SelectAction(usize),
    /// Index into the options of the last `TargetRequested` event.
    SelectTarget(usize),
}

/// Result of handling one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Advanced(Vec<EncounterEvent>),
    /// Input did not fit the current phase or named no valid option.
    Ignored,
}

impl Step {
    pub fn events(&self) -> &[EncounterEvent] {
        match self {
            Self::Advanced(events) => events,
            Self::Ignored => &[],
        }
    }
}

/// One fight between the party and a group of monsters.
pub struct Encounter<'a> {
    env: CombatEnv<'a>,
    party: &'a mut [Player],
    monsters: ArrayVec<Monster, { GameConfig::MAX_MONSTERS }>,
    phase: EncounterPhase,
    roller: DiceRoller,
    seeds: SeedSequence,
}

impl<'a> Encounter<'a> {
    /// Creates an encounter waiting for the first `Continue`.
    ///
    /// Monsters beyond [`GameConfig::MAX_MONSTERS`] are dropped.
    ///
    /// # Arguments
    ///
    /// * `env` - Action catalog, rule table, configuration and RNG
    /// * `party` - Players; they keep their health after the fight
    /// * `monsters` - Freshly spawned monsters
    /// * `seed` - Seed every random draw of this encounter derives from
    pub fn new(
        env: CombatEnv<'a>,
        party: &'a mut [Player],
        monsters: impl IntoIterator<Item = Monster>,
        seed: u64,
    ) -> Self {
        let monsters: ArrayVec<Monster, { GameConfig::MAX_MONSTERS }> =
            monsters.into_iter().take(GameConfig::MAX_MONSTERS).collect();
        info!(
            party = party.len(),
            monsters = monsters.len(),
            seed,
            "encounter created"
        );
        Self {
            env,
            party,
            monsters,
            phase: EncounterPhase::Waiting(WaitReason::EncounterStart),
            roller: DiceRoller::new(),
            seeds: SeedSequence::new(seed),
        }
    }

    pub fn phase(&self) -> &EncounterPhase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn party(&self) -> &[Player] {
        self.party
    }

    /// Monsters still in the fight, in spawn order.
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Dice roller, for queueing predetermined results.
    pub fn roller_mut(&mut self) -> &mut DiceRoller {
        &mut self.roller
    }

    /// Advances the encounter by one input.
    pub fn handle(&mut self, input: EncounterInput) -> Result<Step, EncounterError> {
        let phase = self.phase.clone();
        debug!(?phase, ?input, "encounter input");
        match (phase, input) {
            (EncounterPhase::Victory | EncounterPhase::Defeat, _) => Ok(Step::Ignored),
            (EncounterPhase::Waiting(reason), EncounterInput::Continue) => {
                let mut events = Vec::new();
                match reason {
                    WaitReason::EncounterStart
                    | WaitReason::TurnEnded {
                        next: Side::Players,
                    } => self.begin_player_turn(&mut events)?,
                    WaitReason::TurnEnded {
                        next: Side::Monsters,
                    } => self.begin_monster_turn(&mut events)?,
                }
                Ok(Step::Advanced(events))
            }
            (EncounterPhase::Waiting(reason), _) => Err(EncounterError::Busy { reason }),
            (EncounterPhase::SelectingAction { actor }, EncounterInput::SelectAction(index)) => {
                self.select_action(actor, index)
            }
            (
                EncounterPhase::SelectingTarget { actor, action },
                EncounterInput::SelectTarget(index),
            ) => self.select_target(actor, action, index),
            (
                EncounterPhase::SelectingReaction { actor, attacker },
                EncounterInput::SelectAction(index),
            ) => self.select_reaction(actor, attacker, index),
            _ => Ok(Step::Ignored),
        }
    }

    /// Ids of the actions offered for `trigger`, in catalog order.
    pub fn action_options(&self, trigger: TriggerType) -> Vec<ActionId> {
        self.env
            .actions()
            .available(trigger)
            .into_iter()
            .map(|action| action.id.clone())
            .collect()
    }

    /// Living monsters a target selection may name, in spawn order.
    pub fn target_options(&self) -> Vec<MonsterId> {
        self.monsters
            .iter()
            .filter(|monster| monster.is_alive())
            .map(|monster| monster.id)
            .collect()
    }

    fn select_action(&mut self, actor: PartySlot, index: usize) -> Result<Step, EncounterError> {
        let options = self.action_options(TriggerType::ActiveCombat);
        let Some(action) = options.get(index).cloned() else {
            return Ok(Step::Ignored);
        };

        let targets = self.target_options();
        self.phase = EncounterPhase::SelectingTarget {
            actor,
            action: action.clone(),
        };
        Ok(Step::Advanced(vec![
            EncounterEvent::ActionChosen {
                actor,
                action: action.clone(),
            },
            EncounterEvent::TargetRequested {
                actor,
                action,
                options: targets,
            },
        ]))
    }

    fn select_target(
        &mut self,
        actor: PartySlot,
        action_id: ActionId,
        index: usize,
    ) -> Result<Step, EncounterError> {
        let Some(target) = self.target_options().get(index).copied() else {
            return Ok(Step::Ignored);
        };
        let action = self
            .env
            .actions()
            .action(&action_id)
            .ok_or(EncounterError::UnknownAction(action_id))?;

        let report = self.resolve(actor, action, target)?;
        let mut events = vec![EncounterEvent::ActionResolved(report)];
        if !self.finish_if_over(&mut events) {
            self.phase = EncounterPhase::Waiting(WaitReason::TurnEnded {
                next: Side::Monsters,
            });
        }
        Ok(Step::Advanced(events))
    }

    fn select_reaction(
        &mut self,
        actor: PartySlot,
        attacker: MonsterId,
        index: usize,
    ) -> Result<Step, EncounterError> {
        let options = self.env.actions().available(TriggerType::ReactionCombat);
        let Some(action) = options.get(index).copied() else {
            return Ok(Step::Ignored);
        };

        let report = self.resolve(actor, action, attacker)?;
        let mut events = vec![
            EncounterEvent::ActionChosen {
                actor,
                action: action.id.clone(),
            },
            EncounterEvent::ActionResolved(report),
        ];
        if !self.finish_if_over(&mut events) {
            self.phase = EncounterPhase::Waiting(WaitReason::TurnEnded {
                next: Side::Players,
            });
        }
        Ok(Step::Advanced(events))
    }

    fn player_index(&self, slot: PartySlot) -> Result<usize, EncounterError> {
        self.party
            .iter()
            .position(|player| player.slot == slot)
            .ok_or(EncounterError::UnknownCombatant(CombatantId::Player(slot)))
    }

    fn monster_index(&self, id: MonsterId) -> Result<usize, EncounterError> {
        self.monsters
            .iter()
            .position(|monster| monster.id == id)
            .ok_or(EncounterError::UnknownCombatant(CombatantId::Monster(id)))
    }
}

impl core::fmt::Debug for Encounter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Encounter")
            .field("phase", &self.phase)
            .field("party", &self.party.len())
            .field("monsters", &self.monsters.len())
            .field("nonce", &self.seeds.nonce())
            .finish_non_exhaustive()
    }
}
