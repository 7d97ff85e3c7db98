//! Outcome application.
//!
//! [`apply_outcome`] is a plain dispatch over [`Outcome`]. Each outcome
//! touches only the combatants it names; when one of them is missing (no
//! target, no living ally) the outcome is skipped and reported as such.

use tracing::debug;

use crate::config::CombatConfig;
use crate::state::{Combatant, CombatantId, LedgerScope, Monster, MonsterId, PartySlot, Player};

use super::outcome::Outcome;

/// Mutable view of everyone an outcome can reach.
#[derive(Debug)]
pub struct Battlefield<'a> {
    pub party: &'a mut [Player],
    pub monsters: &'a mut [Monster],
}

impl Battlefield<'_> {
    pub fn player_mut(&mut self, slot: PartySlot) -> Option<&mut Player> {
        self.party.iter_mut().find(|player| player.slot == slot)
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.iter_mut().find(|monster| monster.id == id)
    }

    fn player_damage(&self, slot: PartySlot) -> Option<u8> {
        self.party
            .iter()
            .find(|player| player.slot == slot)
            .map(|player| player.damage)
    }
}

/// Who an outcome refers to during one resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutcomeTargets {
    pub actor: PartySlot,
    /// Monster the action was aimed at (for reactions, the attacker).
    pub target: Option<MonsterId>,
    /// Random living party member other than the actor.
    pub ally: Option<PartySlot>,
    /// Damage the target deals when it lands a hit.
    pub incoming_damage: u8,
}

/// Participant an outcome needed but could not find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Missing {
    Actor,
    Target,
    Ally,
}

/// What applying an outcome actually did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppliedOutcome {
    Damaged { target: CombatantId, amount: u8 },
    Healed { target: PartySlot, amount: u8 },
    Stunned { target: MonsterId },
    KnockedBack { target: MonsterId },
    Exhausted { target: PartySlot, level: u8, amount: u8 },
    Taunted { monsters: Vec<MonsterId>, by: PartySlot },
    AdvantageGranted { target: CombatantId, scope: LedgerScope },
    DisadvantageGranted { target: CombatantId, scope: LedgerScope },
    Skipped { outcome: Outcome, missing: Missing },
    Nothing,
}

/// Applies one outcome.
///
/// # Arguments
///
/// * `outcome` - Outcome to apply
/// * `field` - Party and monsters of the encounter
/// * `targets` - Actor, target and ally of this resolution
/// * `config` - Combat magnitudes
pub fn apply_outcome(
    outcome: Outcome,
    field: &mut Battlefield<'_>,
    targets: &OutcomeTargets,
    config: &CombatConfig,
) -> AppliedOutcome {
    let applied = dispatch(outcome, field, targets, config);
    debug!(outcome = outcome.label(), ?applied, "outcome applied");
    applied
}

fn dispatch(
    outcome: Outcome,
    field: &mut Battlefield<'_>,
    targets: &OutcomeTargets,
    config: &CombatConfig,
) -> AppliedOutcome {
    let skipped = |missing| AppliedOutcome::Skipped { outcome, missing };
    let actor_damage = field.player_damage(targets.actor).unwrap_or(0);

    match outcome {
        Outcome::DealNormalDamage | Outcome::DealDoubleDamage | Outcome::DealTripleDamage => {
            let multiplier = match outcome {
                Outcome::DealDoubleDamage => 2,
                Outcome::DealTripleDamage => 3,
                _ => 1,
            };
            hit_monster(field, targets.target, actor_damage.saturating_mul(multiplier))
                .unwrap_or_else(|| skipped(Missing::Target))
        }
        Outcome::AllyDealsNormalDamage => {
            let Some(ally_damage) = targets.ally.and_then(|ally| field.player_damage(ally)) else {
                return skipped(Missing::Ally);
            };
            hit_monster(field, targets.target, ally_damage).unwrap_or_else(|| skipped(Missing::Target))
        }
        Outcome::HealSelf => match field.player_mut(targets.actor) {
            Some(actor) => AppliedOutcome::Healed {
                target: targets.actor,
                amount: actor.state.health.heal(config.heal_amount),
            },
            None => skipped(Missing::Actor),
        },
        Outcome::StunEnemy => match target_monster(field, targets.target) {
            Some(monster) => {
                monster.stunned = true;
                AppliedOutcome::Stunned { target: monster.id }
            }
            None => skipped(Missing::Target),
        },
        Outcome::KnockbackEnemy => match target_monster(field, targets.target) {
            Some(monster) => {
                monster.state.has_acted = true;
                AppliedOutcome::KnockedBack { target: monster.id }
            }
            None => skipped(Missing::Target),
        },
        Outcome::TakeDamage => hit_player(field, Some(targets.actor), targets.incoming_damage)
            .unwrap_or_else(|| skipped(Missing::Actor)),
        Outcome::AllyRedirectDamage => hit_player(field, targets.ally, targets.incoming_damage)
            .unwrap_or_else(|| skipped(Missing::Ally)),
        Outcome::DealDamageToAlly => {
            hit_player(field, targets.ally, actor_damage).unwrap_or_else(|| skipped(Missing::Ally))
        }
        Outcome::TakeExhaustionDamage => match field.player_mut(targets.actor) {
            Some(actor) => {
                actor.exhaustion_level = actor.exhaustion_level.saturating_add(1);
                let level = actor.exhaustion_level;
                AppliedOutcome::Exhausted {
                    target: targets.actor,
                    level,
                    amount: actor.state.health.damage(level),
                }
            }
            None => skipped(Missing::Actor),
        },
        Outcome::TauntEnemy => match target_monster(field, targets.target) {
            Some(monster) => {
                monster.taunted_by = Some(targets.actor);
                AppliedOutcome::Taunted {
                    monsters: vec![monster.id],
                    by: targets.actor,
                }
            }
            None => skipped(Missing::Target),
        },
        Outcome::TauntAllEnemies => {
            let mut taunted = Vec::new();
            for monster in field.monsters.iter_mut().filter(|m| m.is_alive()) {
                monster.taunted_by = Some(targets.actor);
                taunted.push(monster.id);
            }
            AppliedOutcome::Taunted {
                monsters: taunted,
                by: targets.actor,
            }
        }
        Outcome::GainAdvantage(scope) => match field.player_mut(targets.actor) {
            Some(actor) => {
                actor.state.ledger.grant_advantage(scope);
                AppliedOutcome::AdvantageGranted {
                    target: actor.id(),
                    scope,
                }
            }
            None => skipped(Missing::Actor),
        },
        Outcome::GainDisadvantage(scope) => match field.player_mut(targets.actor) {
            Some(actor) => {
                actor.state.ledger.grant_disadvantage(scope);
                AppliedOutcome::DisadvantageGranted {
                    target: actor.id(),
                    scope,
                }
            }
            None => skipped(Missing::Actor),
        },
        Outcome::EnemyAttackedWithAdvantage
        | Outcome::EnemyAttackedWithDisadvantage
        | Outcome::EnemyDefendedWithAdvantage
        | Outcome::EnemyDefendedWithDisadvantage => {
            let Some(monster) = target_monster(field, targets.target) else {
                return skipped(Missing::Target);
            };
            let scope = match outcome {
                Outcome::EnemyAttackedWithAdvantage | Outcome::EnemyAttackedWithDisadvantage => {
                    LedgerScope::Attack
                }
                _ => LedgerScope::Defense,
            };
            let target = monster.id();
            if matches!(
                outcome,
                Outcome::EnemyAttackedWithAdvantage | Outcome::EnemyDefendedWithAdvantage
            ) {
                monster.state.ledger.grant_advantage(scope);
                AppliedOutcome::AdvantageGranted { target, scope }
            } else {
                monster.state.ledger.grant_disadvantage(scope);
                AppliedOutcome::DisadvantageGranted { target, scope }
            }
        }
        Outcome::Nothing => AppliedOutcome::Nothing,
    }
}

fn target_monster<'f>(
    field: &'f mut Battlefield<'_>,
    target: Option<MonsterId>,
) -> Option<&'f mut Monster> {
    target
        .and_then(|id| field.monster_mut(id))
        .filter(|monster| monster.is_alive())
}

fn hit_monster(field: &mut Battlefield<'_>, target: Option<MonsterId>, amount: u8) -> Option<AppliedOutcome> {
    let monster = target_monster(field, target)?;
    Some(AppliedOutcome::Damaged {
        target: monster.id(),
        amount: monster.state.health.damage(amount),
    })
}

fn hit_player(field: &mut Battlefield<'_>, slot: Option<PartySlot>, amount: u8) -> Option<AppliedOutcome> {
    let player = field.player_mut(slot?)?;
    Some(AppliedOutcome::Damaged {
        target: player.id(),
        amount: player.state.health.damage(amount),
    })
}
