//! Session driver.
//!
//! A [`Session`] owns the loaded content and the party across encounters.
//! It spawns monsters from the ecosystem, feeds the encounter engine with
//! decisions from a [`DecisionProvider`], and publishes every engine event and
//! session milestone on the [`EventBus`].

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use game_content::ContentBundle;
use game_core::{
    ActionCatalog, ActionOracle, Combatant, CombatEnv, DrawContext, Encounter, EncounterEvent,
    EncounterError, EncounterInput, EncounterPhase, Lesson, Mentor, PartySlot, PcgRng, Player,
    SeedSequence, SpawnAnnouncement, Step, TriggerType,
};

use crate::api::{ActionRequest, DecisionProvider, Result, RuntimeError, TargetRequest};
use crate::events::{EncounterOutcome, Event, EventBus, SessionEvent, Topic};
use crate::providers::AutoPilot;

/// Session configuration.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Seed every random draw of the session derives from.
    pub seed: u64,
    /// Inputs one encounter may consume before the session gives up on it.
    pub max_inputs: usize,
    pub event_buffer_size: usize,
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_random_seed() -> Self {
        Self::with_seed(rand::random())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_inputs: 10_000,
            event_buffer_size: 256,
        }
    }
}

/// What happened in one finished encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterSummary {
    pub index: u32,
    pub outcome: EncounterOutcome,
    /// Monster names in spawn order.
    pub monsters: Vec<String>,
    /// Actions resolved by the party.
    pub actions: usize,
    pub inputs: usize,
}

/// Strings encounters together with rests, day progression and training.
pub struct Session {
    content: ContentBundle,
    config: SessionConfig,
    provider: Box<dyn DecisionProvider>,
    events: EventBus,
    rng: PcgRng,
    seeds: SeedSequence,
    day: u32,
    encounters: u32,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn encounters_fought(&self) -> u32 {
        self.encounters
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn party(&self) -> &[Player] {
        &self.content.party
    }

    pub fn party_alive(&self) -> bool {
        self.content.party.iter().any(|player| player.is_alive())
    }

    pub fn content(&self) -> &ContentBundle {
        &self.content
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Spawns monsters and plays one encounter to the end.
    pub async fn run_encounter(&mut self) -> Result<EncounterSummary> {
        if !self.party_alive() {
            return Err(RuntimeError::PartyDefeated);
        }

        let index = self.encounters;
        let day = self.day;
        let Self {
            content,
            config,
            provider,
            events,
            rng,
            seeds,
            ..
        } = self;

        let monsters = content.spawn.spawn_encounter(&content.config, &*rng, seeds);
        if monsters.is_empty() {
            return Err(RuntimeError::NoMonsters);
        }
        let names: Vec<String> = monsters.iter().map(|m| m.name().to_owned()).collect();
        info!(index, day, monsters = ?names, "encounter started");
        events.publish(Event::Session(SessionEvent::EncounterStarted {
            index,
            day,
            monsters: names.clone(),
        }));

        let encounter_seed = seeds.next(index, DrawContext::Spawn);
        let env = CombatEnv::new(&content.actions, &content.rules, &content.config, &*rng);
        let mut encounter = Encounter::new(env, &mut content.party, monsters, encounter_seed);

        let mut inputs = 0;
        let mut actions = 0;
        while !encounter.is_finished() {
            if inputs >= config.max_inputs {
                warn!(index, limit = config.max_inputs, "encounter stalled");
                return Err(RuntimeError::Stalled {
                    limit: config.max_inputs,
                });
            }
            let input = next_input(&encounter, &content.actions, &**provider).await?;
            inputs += 1;

            match encounter.handle(input)? {
                Step::Advanced(step_events) => {
                    for event in step_events {
                        if matches!(event, EncounterEvent::ActionResolved(_)) {
                            actions += 1;
                        }
                        events.publish(Event::Encounter(event));
                    }
                }
                Step::Ignored => warn!(?input, "input ignored; asking again"),
            }
        }

        let outcome = match encounter.phase() {
            EncounterPhase::Victory => EncounterOutcome::Victory,
            _ => EncounterOutcome::Defeat,
        };
        drop(encounter);

        self.encounters += 1;
        info!(index, ?outcome, inputs, actions, "encounter finished");
        self.events
            .publish(Event::Session(SessionEvent::EncounterFinished {
                index,
                outcome,
                inputs,
            }));

        Ok(EncounterSummary {
            index,
            outcome,
            monsters: names,
            actions,
            inputs,
        })
    }

    /// Makes camp: the whole party is restored, fallen members included, and
    /// the next day dawns on the ecosystem.
    ///
    /// Returns the ecosystem change of the new day, if any.
    pub fn rest(&mut self) -> Option<SpawnAnnouncement> {
        for player in &mut self.content.party {
            player.state.health.restore();
            player.exhaustion_level = 0;
        }
        self.day += 1;
        info!(day = self.day, "party rested");
        self.events
            .publish(Event::Session(SessionEvent::Rested { day: self.day }));

        let announcement = self.content.spawn.advance_day(
            self.day,
            &self.content.config.encounters,
            &self.rng,
            &mut self.seeds,
        );
        if let Some(announcement) = &announcement {
            info!(day = self.day, %announcement, "ecosystem changed");
            self.events
                .publish(Event::Session(SessionEvent::Ecosystem(announcement.clone())));
        }
        announcement
    }

    /// Has `mentor` train the party member in `slot`.
    pub fn teach(&mut self, slot: PartySlot, mentor: &Mentor) -> Result<Lesson> {
        let player = self
            .content
            .party
            .iter_mut()
            .find(|player| player.slot == slot)
            .ok_or(RuntimeError::UnknownSlot(slot))?;
        let lesson = mentor.teach(&mut player.state.attributes);
        info!(
            %slot,
            mentor = %mentor.name,
            attribute = lesson.attribute.as_str(),
            before = lesson.before,
            after = lesson.after,
            "training complete"
        );
        self.events.publish(Event::Session(SessionEvent::Trained {
            slot,
            mentor: mentor.name.clone(),
            lesson,
        }));
        Ok(lesson)
    }

    /// Plays up to `encounters` encounters, stopping at the first defeat.
    ///
    /// With `rest_between`, the party rests after every victory that is
    /// followed by another encounter.
    pub async fn run(
        &mut self,
        encounters: u32,
        rest_between: bool,
    ) -> Result<Vec<EncounterSummary>> {
        let mut summaries = Vec::new();
        for remaining in (0..encounters).rev() {
            let summary = self.run_encounter().await?;
            let outcome = summary.outcome;
            summaries.push(summary);
            if outcome == EncounterOutcome::Defeat {
                info!(day = self.day, "party defeated; session over");
                break;
            }
            if rest_between && remaining > 0 {
                self.rest();
            }
        }
        Ok(summaries)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("day", &self.day)
            .field("encounters", &self.encounters)
            .field("party", &self.content.party.len())
            .finish_non_exhaustive()
    }
}

/// Asks the provider for the input the current phase expects.
async fn next_input(
    encounter: &Encounter<'_>,
    actions: &ActionCatalog,
    provider: &dyn DecisionProvider,
) -> Result<EncounterInput> {
    let find_player = |slot: PartySlot| {
        encounter
            .party()
            .iter()
            .find(|player| player.slot == slot)
            .ok_or(RuntimeError::UnknownSlot(slot))
    };

    match encounter.phase() {
        EncounterPhase::SelectingAction { actor } => {
            let request = ActionRequest {
                actor: find_player(*actor)?,
                trigger: TriggerType::ActiveCombat,
                options: actions.available(TriggerType::ActiveCombat),
                attacker: None,
                party: encounter.party(),
                monsters: encounter.monsters(),
            };
            let choice = provider.choose_action(&request).await?;
            debug!(actor = %actor, choice, "action chosen");
            Ok(EncounterInput::SelectAction(choice))
        }
        EncounterPhase::SelectingReaction { actor, attacker } => {
            let request = ActionRequest {
                actor: find_player(*actor)?,
                trigger: TriggerType::ReactionCombat,
                options: actions.available(TriggerType::ReactionCombat),
                attacker: encounter.monsters().iter().find(|m| m.id == *attacker),
                party: encounter.party(),
                monsters: encounter.monsters(),
            };
            let choice = provider.choose_action(&request).await?;
            debug!(actor = %actor, choice, "reaction chosen");
            Ok(EncounterInput::SelectAction(choice))
        }
        EncounterPhase::SelectingTarget { actor, action } => {
            let action = actions
                .action(action)
                .ok_or_else(|| EncounterError::UnknownAction(action.clone()))?;
            let request = TargetRequest {
                actor: find_player(*actor)?,
                action,
                options: encounter
                    .monsters()
                    .iter()
                    .filter(|monster| monster.is_alive())
                    .collect(),
            };
            let choice = provider.choose_target(&request).await?;
            debug!(actor = %actor, choice, "target chosen");
            Ok(EncounterInput::SelectTarget(choice))
        }
        EncounterPhase::Waiting(_) | EncounterPhase::Victory | EncounterPhase::Defeat => {
            Ok(EncounterInput::Continue)
        }
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: SessionConfig,
    content: Option<ContentBundle>,
    provider: Option<Box<dyn DecisionProvider>>,
    events: Option<EventBus>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            content: None,
            provider: None,
            events: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set required content bundle
    pub fn content(mut self, content: ContentBundle) -> Self {
        self.content = Some(content);
        self
    }

    /// Set decision provider (defaults to [`AutoPilot`])
    pub fn provider(mut self, provider: impl DecisionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Share an existing event bus instead of creating one
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn build(self) -> Result<Session> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        let issues = content.issues();
        if !issues.is_empty() {
            warn!(issues = issues.len(), "content has gaps; affected actions do nothing");
        }

        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));
        let provider: Box<dyn DecisionProvider> = match self.provider {
            Some(provider) => provider,
            None => Box::new(AutoPilot::new()),
        };
        info!(
            seed = self.config.seed,
            party = content.party.len(),
            monster_types = content.spawn.entries().len(),
            "session ready"
        );

        Ok(Session {
            content,
            config: self.config,
            provider,
            events,
            rng: PcgRng,
            seeds: SeedSequence::new(self.config.seed),
            day: 1,
            encounters: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Attribute;

    fn session(seed: u64) -> Session {
        Session::builder()
            .content(ContentBundle::embedded().unwrap())
            .seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_content() {
        assert!(matches!(
            Session::builder().build(),
            Err(RuntimeError::MissingContent)
        ));
    }

    #[test]
    fn rest_restores_party_and_advances_day() {
        let mut session = session(7);
        for player in &mut session.content.party {
            player.state.health.damage(u8::MAX);
            player.exhaustion_level = 2;
        }
        assert!(!session.party_alive());

        session.rest();
        assert_eq!(session.day(), 2);
        assert!(session.party().iter().all(|p| {
            p.state.health.current() == p.state.health.maximum() && p.exhaustion_level == 0
        }));
    }

    #[test]
    fn teach_raises_attribute() {
        let mut session = session(7);
        let slot = session.party()[0].slot;
        let before = session.party()[0].state.attributes.get(Attribute::Stamina);

        let lesson = session
            .teach(slot, &Mentor::for_archetype("Old Wen", "monk"))
            .unwrap();
        assert_eq!(lesson.attribute, Attribute::Stamina);
        assert_eq!(lesson.before, before);
        assert!(lesson.after > before);
        assert_eq!(
            session.party()[0].state.attributes.get(Attribute::Stamina),
            lesson.after
        );
    }

    #[test]
    fn teach_unknown_slot_fails() {
        let mut session = session(7);
        let mentor = Mentor::for_archetype("Old Wen", "monk");
        assert!(matches!(
            session.teach(PartySlot(9), &mentor),
            Err(RuntimeError::UnknownSlot(PartySlot(9)))
        ));
    }

    #[tokio::test]
    async fn fallen_party_cannot_fight() {
        let mut session = session(7);
        for player in &mut session.content.party {
            player.state.health.damage(u8::MAX);
        }
        assert!(matches!(
            session.run_encounter().await,
            Err(RuntimeError::PartyDefeated)
        ));
    }
}
