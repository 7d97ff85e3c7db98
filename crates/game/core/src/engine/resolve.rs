//! Action resolution.
//!
//! success check → critical/fumble check → rule lookup → outcome application
//! → actor ledger cleared → dead monsters removed.

use tracing::{debug, info, warn};

use crate::action::{PlayerAction, TriggerType};
use crate::check::{CheckKind, SkillCheck};
use crate::dice::{AdvantageCounts, resolve_advantage};
use crate::env::DrawContext;
use crate::rules::{
    Battlefield, CombatContext, OutcomeTargets, apply_outcome, find_applicable_outcomes,
};
use crate::state::{Combatant, CombatantId, LedgerScope, MonsterId, PartySlot};

use super::{ActionReport, Encounter, EncounterError};

/// Ledger scope a check draws banked stacks from.
///
/// Success and critical checks of an active action are attacks; every check
/// of a reaction is a defense. The fumble check of an active action only uses
/// general stacks.
pub(crate) fn check_framing(trigger: TriggerType, kind: CheckKind) -> LedgerScope {
    match (trigger, kind) {
        (TriggerType::ReactionCombat, _) => LedgerScope::Defense,
        (TriggerType::ActiveCombat, CheckKind::Fumble) => LedgerScope::General,
        (TriggerType::ActiveCombat, _) => LedgerScope::Attack,
    }
}

impl Encounter<'_> {
    /// Resolves `action` by `actor` against `target`.
    ///
    /// For a reaction, `target` is the attacking monster.
    pub(super) fn resolve(
        &mut self,
        actor: PartySlot,
        action: &PlayerAction,
        target: MonsterId,
    ) -> Result<ActionReport, EncounterError> {
        let actor_index = self.player_index(actor)?;
        let target_index = self.monster_index(target)?;
        let actor_seed = CombatantId::Player(actor).seed_id();

        // ===== skill checks =====
        let mut check = SkillCheck::new();
        while let Some(kind) = check.pending() {
            let framing = check_framing(action.trigger, kind);
            let attribute = action.attribute_for(kind);

            let player = &mut self.party[actor_index];
            let mut counts = AdvantageCounts::from_hint(action.roll_hint_for(kind));
            counts += player.state.ledger.consume(framing);
            if framing != LedgerScope::General {
                counts += self.monsters[target_index]
                    .state
                    .ledger
                    .consume_scope(framing);
            }
            let attribute_value = player.state.attributes.get(attribute);

            let seed = self.seeds.next(actor_seed, DrawContext::Dice);
            let draws = self.roller.roll(self.env.rng(), seed);
            let roll = resolve_advantage(draws, counts);
            debug!(
                check = kind.as_str(),
                attribute = attribute.as_str(),
                target = attribute_value,
                advantages = counts.advantages,
                disadvantages = counts.disadvantages,
                value = roll.value,
                roll_type = roll.roll_type.as_str(),
                "check rolled"
            );
            check.record(attribute, attribute_value, roll)?;
        }
        let tier = check.finish()?;

        // ===== rule lookup =====
        let outcomes = {
            let ctx = CombatContext::new(
                &self.party[actor_index],
                Some(&self.monsters[target_index]),
                &*self.party,
                &self.monsters,
            );
            find_applicable_outcomes(self.env.rules(), &action.id, tier, &ctx)
        };
        if outcomes.is_empty() {
            warn!(
                action = %action.id,
                tier = tier.as_str(),
                "no outcome rule matches; action has no effect"
            );
        }

        // ===== outcome application =====
        let ally = if outcomes.iter().any(|outcome| outcome.needs_ally()) {
            self.pick_ally(actor)
        } else {
            None
        };
        let targets = OutcomeTargets {
            actor,
            target: Some(target),
            ally,
            incoming_damage: self.monsters[target_index].damage,
        };
        let alive_before: Vec<PartySlot> = self
            .party
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.slot)
            .collect();

        let config = &self.env.config().combat;
        let mut field = Battlefield {
            party: &mut *self.party,
            monsters: self.monsters.as_mut_slice(),
        };
        let applied = outcomes
            .iter()
            .map(|outcome| apply_outcome(*outcome, &mut field, &targets, config))
            .collect();

        self.party[actor_index].state.ledger.clear();

        let defeated: Vec<MonsterId> = self
            .monsters
            .iter()
            .filter(|m| !m.is_alive())
            .map(|m| m.id)
            .collect();
        self.monsters.retain(|m| m.is_alive());
        let fallen: Vec<PartySlot> = alive_before
            .into_iter()
            .filter(|slot| self.party.iter().any(|p| p.slot == *slot && !p.is_alive()))
            .collect();

        info!(
            %actor,
            action = %action.id,
            %target,
            tier = tier.as_str(),
            outcomes = outcomes.len(),
            defeated = defeated.len(),
            "action resolved"
        );

        Ok(ActionReport {
            actor,
            action: action.id.clone(),
            trigger: action.trigger,
            target,
            checks: check.records().to_vec(),
            tier,
            outcomes,
            applied,
            defeated,
            fallen,
        })
    }

    /// Random living party member other than `actor`.
    fn pick_ally(&mut self, actor: PartySlot) -> Option<PartySlot> {
        let allies: Vec<PartySlot> = self
            .party
            .iter()
            .filter(|p| p.slot != actor && p.is_alive())
            .map(|p| p.slot)
            .collect();
        let seed = self
            .seeds
            .next(CombatantId::Player(actor).seed_id(), DrawContext::AllyPick);
        allies.get(self.env.rng().index(seed, allies.len())).copied()
    }
}
