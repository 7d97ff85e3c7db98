//! Turns runtime events into output lines.

use anyhow::Result;
use game_core::{
    ActionReport, AppliedOutcome, CombatantId, EncounterEvent, MonsterId, PartySlot, Player,
};
use runtime::{EncounterOutcome, Event, SessionEvent};

/// Renders events as text, or as one JSON object per line.
#[derive(Debug, Clone)]
pub struct Narrator {
    json: bool,
    party: Vec<(PartySlot, String)>,
    /// Names of the current encounter's monsters, indexed by id.
    monsters: Vec<String>,
}

impl Narrator {
    pub fn new(party: &[Player], json: bool) -> Self {
        Self {
            json,
            party: party
                .iter()
                .map(|player| (player.slot, player.state.name.clone()))
                .collect(),
            monsters: Vec::new(),
        }
    }

    /// Output line for `event`, if it is worth printing.
    pub fn render(&mut self, event: &Event) -> Result<Option<String>> {
        if let Event::Session(SessionEvent::EncounterStarted { monsters, .. }) = event {
            self.monsters = monsters.clone();
        }
        if self.json {
            return Ok(Some(serde_json::to_string(event)?));
        }
        Ok(match event {
            Event::Session(event) => Some(self.session_line(event)),
            Event::Encounter(event) => self.encounter_line(event),
        })
    }

    fn session_line(&self, event: &SessionEvent) -> String {
        match event {
            SessionEvent::EncounterStarted {
                index,
                day,
                monsters,
            } => format!(
                "== Encounter {} (day {day}): {} ==",
                index + 1,
                monsters.join(", ")
            ),
            SessionEvent::EncounterFinished {
                index,
                outcome,
                inputs,
            } => {
                let outcome = match outcome {
                    EncounterOutcome::Victory => "victory",
                    EncounterOutcome::Defeat => "defeat",
                };
                format!("== Encounter {} ended in {outcome} ({inputs} inputs) ==", index + 1)
            }
            SessionEvent::Rested { day } => format!("The party rests. Day {day} begins."),
            SessionEvent::Ecosystem(announcement) => format!("{announcement}."),
            SessionEvent::Trained {
                slot,
                mentor,
                lesson,
            } => format!(
                "{mentor} trains {}: {} {} -> {}",
                self.player(*slot),
                lesson.attribute,
                lesson.before,
                lesson.after
            ),
        }
    }

    fn encounter_line(&self, event: &EncounterEvent) -> Option<String> {
        let line = match event {
            EncounterEvent::TurnPassed { actor } => {
                format!("{} has nothing to do", self.combatant(*actor))
            }
            EncounterEvent::MonsterStunned { monster } => {
                format!("{} is stunned and loses its turn", self.monster(*monster))
            }
            EncounterEvent::MonsterAttacks { monster, target } => {
                format!("{} attacks {}", self.monster(*monster), self.player(*target))
            }
            EncounterEvent::UndefendedHit {
                monster,
                target,
                damage,
            } => format!(
                "{} hits {} for {damage}",
                self.monster(*monster),
                self.player(*target)
            ),
            EncounterEvent::ActionResolved(report) => self.report_lines(report),
            EncounterEvent::Victory => "Victory!".to_owned(),
            EncounterEvent::Defeat => "The party has fallen.".to_owned(),
            EncounterEvent::CycleReset { .. }
            | EncounterEvent::TurnStarted { .. }
            | EncounterEvent::ActionRequested { .. }
            | EncounterEvent::ActionChosen { .. }
            | EncounterEvent::TargetRequested { .. } => return None,
        };
        Some(line)
    }

    fn report_lines(&self, report: &ActionReport) -> String {
        let rolls: Vec<String> = report
            .checks
            .iter()
            .map(|check| {
                format!(
                    "{} {}/{}",
                    check.kind.as_str(),
                    check.roll.value,
                    check.target
                )
            })
            .collect();
        let mut line = format!(
            "{} uses {} on {}: {} ({})",
            self.player(report.actor),
            report.action,
            self.monster(report.target),
            report.tier.as_str(),
            rolls.join(", ")
        );
        for applied in &report.applied {
            if let Some(effect) = self.applied_line(applied) {
                line.push_str("\n  - ");
                line.push_str(&effect);
            }
        }
        line
    }

    fn applied_line(&self, applied: &AppliedOutcome) -> Option<String> {
        let line = match applied {
            AppliedOutcome::Damaged { target, amount } => {
                format!("{} takes {amount} damage", self.combatant(*target))
            }
            AppliedOutcome::Healed { target, amount } => {
                format!("{} heals {amount}", self.player(*target))
            }
            AppliedOutcome::Stunned { target } => format!("{} is stunned", self.monster(*target)),
            AppliedOutcome::KnockedBack { target } => {
                format!("{} is knocked back", self.monster(*target))
            }
            AppliedOutcome::Exhausted {
                target,
                level,
                amount,
            } => format!(
                "{} is exhausted (level {level}) and takes {amount} damage",
                self.player(*target)
            ),
            AppliedOutcome::Taunted { monsters, by } => {
                let names: Vec<String> = monsters.iter().map(|id| self.monster(*id)).collect();
                format!("{} taunts {}", self.player(*by), names.join(", "))
            }
            AppliedOutcome::AdvantageGranted { target, scope } => {
                format!("{} gains {} advantage", self.combatant(*target), scope.as_str())
            }
            AppliedOutcome::DisadvantageGranted { target, scope } => {
                format!("{} suffers {} disadvantage", self.combatant(*target), scope.as_str())
            }
            AppliedOutcome::Skipped { outcome, missing } => {
                format!("{outcome} skipped (no {missing:?})")
            }
            AppliedOutcome::Nothing => return None,
        };
        Some(line)
    }

    fn player(&self, slot: PartySlot) -> String {
        self.party
            .iter()
            .find(|(s, _)| *s == slot)
            .map_or_else(|| slot.to_string(), |(_, name)| name.clone())
    }

    fn monster(&self, id: MonsterId) -> String {
        self.monsters
            .get(usize::from(id.0))
            .map_or_else(|| id.to_string(), |name| format!("{name} ({id})"))
    }

    fn combatant(&self, id: CombatantId) -> String {
        match id {
            CombatantId::Player(slot) => self.player(slot),
            CombatantId::Monster(monster) => self.monster(monster),
        }
    }
}
