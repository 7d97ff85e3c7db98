//! Turn scheduling.
//!
//! Players and monsters alternate. Within a side, each living combatant acts
//! once per cycle; the acting combatant is drawn at random from those that
//! have not acted yet, and the cycle resets when none are left.

use tracing::{debug, info, warn};

use crate::action::TriggerType;
use crate::env::DrawContext;
use crate::state::{Combatant, CombatantId, MonsterId, PartySlot};

use super::{Encounter, EncounterError, EncounterEvent, EncounterPhase, Side, WaitReason};

impl Encounter<'_> {
    pub(super) fn begin_player_turn(
        &mut self,
        events: &mut Vec<EncounterEvent>,
    ) -> Result<(), EncounterError> {
        if self.finish_if_over(events) {
            return Ok(());
        }

        let mut ready = self.ready_players();
        if ready.is_empty() {
            for player in self.party.iter_mut().filter(|p| p.is_alive()) {
                player.state.has_acted = false;
            }
            debug!("player cycle reset");
            events.push(EncounterEvent::CycleReset {
                side: Side::Players,
            });
            ready = self.ready_players();
        }

        let seed = self.seeds.next(0, DrawContext::ActorPick);
        let Some(&actor) = ready.get(self.env.rng().index(seed, ready.len())) else {
            self.end(EncounterPhase::Defeat, events);
            return Ok(());
        };
        let index = self.player_index(actor)?;
        self.party[index].state.has_acted = true;
        events.push(EncounterEvent::TurnStarted {
            actor: CombatantId::Player(actor),
        });

        let options = self.action_options(TriggerType::ActiveCombat);
        if options.is_empty() {
            warn!(%actor, "no active actions configured; turn passes");
            events.push(EncounterEvent::TurnPassed {
                actor: CombatantId::Player(actor),
            });
            self.phase = EncounterPhase::Waiting(WaitReason::TurnEnded {
                next: Side::Monsters,
            });
            return Ok(());
        }

        events.push(EncounterEvent::ActionRequested {
            actor,
            trigger: TriggerType::ActiveCombat,
            options,
        });
        self.phase = EncounterPhase::SelectingAction { actor };
        Ok(())
    }

    pub(super) fn begin_monster_turn(
        &mut self,
        events: &mut Vec<EncounterEvent>,
    ) -> Result<(), EncounterError> {
        if self.finish_if_over(events) {
            return Ok(());
        }

        let mut ready = self.ready_monsters();
        if ready.is_empty() {
            for monster in self.monsters.iter_mut().filter(|m| m.is_alive()) {
                monster.state.has_acted = false;
            }
            debug!("monster cycle reset");
            events.push(EncounterEvent::CycleReset {
                side: Side::Monsters,
            });
            ready = self.ready_monsters();
        }

        let seed = self.seeds.next(0, DrawContext::ActorPick);
        let Some(&monster_id) = ready.get(self.env.rng().index(seed, ready.len())) else {
            self.end(EncounterPhase::Victory, events);
            return Ok(());
        };
        let index = self.monster_index(monster_id)?;
        let monster = &mut self.monsters[index];
        monster.state.has_acted = true;
        events.push(EncounterEvent::TurnStarted {
            actor: CombatantId::Monster(monster_id),
        });

        if monster.stunned {
            monster.stunned = false;
            debug!(monster = %monster_id, "stunned; turn lost");
            events.push(EncounterEvent::MonsterStunned {
                monster: monster_id,
            });
            self.phase = EncounterPhase::Waiting(WaitReason::TurnEnded {
                next: Side::Players,
            });
            return Ok(());
        }

        let taunter = monster.taunted_by;
        let damage = monster.damage;
        let Some(target) = self.pick_monster_target(monster_id, taunter) else {
            self.end(EncounterPhase::Defeat, events);
            return Ok(());
        };
        events.push(EncounterEvent::MonsterAttacks {
            monster: monster_id,
            target,
        });

        let options = self.action_options(TriggerType::ReactionCombat);
        if options.is_empty() {
            let index = self.player_index(target)?;
            let dealt = self.party[index].state.health.damage(damage);
            warn!(%target, "no reaction actions configured; hit lands undefended");
            events.push(EncounterEvent::UndefendedHit {
                monster: monster_id,
                target,
                damage: dealt,
            });
            if !self.finish_if_over(events) {
                self.phase = EncounterPhase::Waiting(WaitReason::TurnEnded {
                    next: Side::Players,
                });
            }
            return Ok(());
        }

        events.push(EncounterEvent::ActionRequested {
            actor: target,
            trigger: TriggerType::ReactionCombat,
            options,
        });
        self.phase = EncounterPhase::SelectingReaction {
            actor: target,
            attacker: monster_id,
        };
        Ok(())
    }

    /// Ends the encounter if one side has no living combatant left.
    ///
    /// Returns true when the encounter is over.
    pub(super) fn finish_if_over(&mut self, events: &mut Vec<EncounterEvent>) -> bool {
        if !self.monsters.iter().any(|m| m.is_alive()) {
            self.end(EncounterPhase::Victory, events);
            true
        } else if !self.party.iter().any(|p| p.is_alive()) {
            self.end(EncounterPhase::Defeat, events);
            true
        } else {
            false
        }
    }

    /// A living taunter is forced; otherwise a random living player.
    fn pick_monster_target(
        &mut self,
        monster: MonsterId,
        taunter: Option<PartySlot>,
    ) -> Option<PartySlot> {
        let forced = taunter.filter(|slot| self.party.iter().any(|p| p.slot == *slot && p.is_alive()));
        if forced.is_some() {
            return forced;
        }

        let living: Vec<PartySlot> = self
            .party
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.slot)
            .collect();
        let seed = self
            .seeds
            .next(CombatantId::Monster(monster).seed_id(), DrawContext::TargetPick);
        living.get(self.env.rng().index(seed, living.len())).copied()
    }

    fn ready_players(&self) -> Vec<PartySlot> {
        self.party
            .iter()
            .filter(|p| p.can_act())
            .map(|p| p.slot)
            .collect()
    }

    fn ready_monsters(&self) -> Vec<MonsterId> {
        self.monsters
            .iter()
            .filter(|m| m.can_act())
            .map(|m| m.id)
            .collect()
    }

    /// Moves to a terminal phase and clears per-encounter state.
    ///
    /// Banked stacks, acted flags and exhaustion are reset on every player;
    /// all monsters leave the fight.
    fn end(&mut self, outcome: EncounterPhase, events: &mut Vec<EncounterEvent>) {
        for player in self.party.iter_mut() {
            player.state.ledger.clear();
            player.state.has_acted = false;
            player.exhaustion_level = 0;
        }
        self.monsters.clear();

        let event = if outcome == EncounterPhase::Victory {
            info!("encounter won");
            EncounterEvent::Victory
        } else {
            info!("party defeated");
            EncounterEvent::Defeat
        };
        events.push(event);
        self.phase = outcome;
    }
}
