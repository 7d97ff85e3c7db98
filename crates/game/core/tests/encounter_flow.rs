//! End-to-end encounter flows driven with predetermined dice.

use game_core::{
    ActionCatalog, ActionId, Attribute, AttributeSet, CombatEnv, Combatant, CombatantId,
    DigitPair, Encounter, EncounterError, EncounterEvent, EncounterInput, EncounterPhase,
    GameConfig, Monster, MonsterId, MonsterTemplate, Outcome, OutcomeRule, PartySlot, PcgRng,
    Player, PlayerAction, ResultKey, ResultTier, RollType, RuleTable, Side, Step, TriggerType,
    WaitReason,
};

// Attributes are 50 everywhere: 10 passes a check, 90 fails it.
const PASS: u8 = 10;
const FAIL: u8 = 90;

fn action(id: &str, trigger: TriggerType) -> PlayerAction {
    PlayerAction {
        id: ActionId::new(id),
        name: id.to_string(),
        trigger,
        success_attribute: Attribute::Force,
        critical_attribute: Attribute::Reflexe,
        fumble_attribute: Attribute::Stamina,
        success_roll: RollType::Normal,
        critical_roll: RollType::Normal,
        fumble_roll: RollType::Normal,
        target_prompt: String::new(),
        verb: String::new(),
        description: String::new(),
    }
}

fn rule(action: &str, tier: ResultTier, outcomes: Vec<Outcome>) -> OutcomeRule {
    OutcomeRule {
        name: format!("{action}-{}", tier.as_str()),
        label: String::new(),
        description: String::new(),
        applies_to: vec![ResultKey::new(action, tier)],
        conditions: Vec::new(),
        outcomes,
    }
}

struct Fixture {
    actions: ActionCatalog,
    rules: RuleTable,
    config: GameConfig,
    rng: PcgRng,
}

impl Fixture {
    fn new(extra: Vec<OutcomeRule>) -> Self {
        let mut rules = vec![
            rule("strike", ResultTier::CriticalSuccess, vec![Outcome::DealDoubleDamage]),
            rule("strike", ResultTier::PartlySuccess, vec![Outcome::DealNormalDamage]),
            rule("parry", ResultTier::CriticalSuccess, vec![Outcome::StunEnemy]),
            rule("parry", ResultTier::PartlySuccess, vec![Outcome::Nothing]),
            rule("parry", ResultTier::PartlyFailure, vec![Outcome::TakeDamage]),
            rule("parry", ResultTier::Fumble, vec![Outcome::TakeExhaustionDamage]),
        ];
        rules.extend(extra);
        Self {
            actions: [
                action("strike", TriggerType::ActiveCombat),
                action("parry", TriggerType::ReactionCombat),
            ]
            .into_iter()
            .collect(),
            rules: rules.into_iter().collect(),
            config: GameConfig::default(),
            rng: PcgRng,
        }
    }

    fn without_reactions() -> Self {
        let mut fixture = Self::new(Vec::new());
        fixture.actions = [action("strike", TriggerType::ActiveCombat)]
            .into_iter()
            .collect();
        fixture
    }

    fn env(&self) -> CombatEnv<'_> {
        CombatEnv::new(&self.actions, &self.rules, &self.config, &self.rng)
    }
}

fn knight(slot: u8, health: u8) -> Player {
    Player::new(PartySlot(slot), format!("Knight{slot}"), AttributeSet::default(), health)
}

fn ghoul(id: u16, health: u8) -> Monster {
    MonsterTemplate::new("Ghoul", health, AttributeSet::default())
        .spawn(MonsterId(id), &GameConfig::default())
}

fn advanced(step: Step) -> Vec<EncounterEvent> {
    match step {
        Step::Advanced(events) => events,
        Step::Ignored => panic!("input was ignored"),
    }
}

fn report(events: &[EncounterEvent]) -> &game_core::ActionReport {
    events
        .iter()
        .find_map(|event| match event {
            EncounterEvent::ActionResolved(report) => Some(report),
            _ => None,
        })
        .expect("no action resolved")
}

/// Plays one player turn: strike at the first target with the given draws.
fn strike(encounter: &mut Encounter<'_>, draws: [u8; 2]) -> Vec<EncounterEvent> {
    advanced(encounter.handle(EncounterInput::Continue).unwrap());
    advanced(encounter.handle(EncounterInput::SelectAction(0)).unwrap());
    for value in draws {
        encounter.roller_mut().force_result(value);
    }
    advanced(encounter.handle(EncounterInput::SelectTarget(0)).unwrap())
}

/// Plays one monster turn: parry with the given draws.
fn parry(encounter: &mut Encounter<'_>, draws: [u8; 2]) -> Vec<EncounterEvent> {
    let mut events = advanced(encounter.handle(EncounterInput::Continue).unwrap());
    for value in draws {
        encounter.roller_mut().force_result(value);
    }
    events.extend(advanced(encounter.handle(EncounterInput::SelectAction(0)).unwrap()));
    events
}

#[test]
fn critical_strike_wins_the_encounter() {
    let fixture = Fixture::new(Vec::new());
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 2)], 1);

    let events = strike(&mut encounter, [PASS, PASS]);
    let report = report(&events);
    assert_eq!(report.tier, ResultTier::CriticalSuccess);
    assert_eq!(report.defeated, vec![MonsterId(0)]);
    assert_eq!(events.last(), Some(&EncounterEvent::Victory));
    assert_eq!(encounter.phase(), &EncounterPhase::Victory);
    assert!(encounter.monsters().is_empty());

    assert_eq!(
        encounter.handle(EncounterInput::Continue).unwrap(),
        Step::Ignored
    );
}

#[test]
fn selections_while_waiting_are_busy() {
    let fixture = Fixture::new(Vec::new());
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 2);

    let err = encounter
        .handle(EncounterInput::SelectAction(0))
        .unwrap_err();
    assert!(matches!(
        err,
        EncounterError::Busy {
            reason: WaitReason::EncounterStart
        }
    ));
}

#[test]
fn mismatched_inputs_are_ignored() {
    let fixture = Fixture::new(Vec::new());
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 3);

    let events = advanced(encounter.handle(EncounterInput::Continue).unwrap());
    assert!(events.contains(&EncounterEvent::TurnStarted {
        actor: CombatantId::Player(PartySlot(0))
    }));
    assert_eq!(
        encounter.handle(EncounterInput::SelectTarget(0)).unwrap(),
        Step::Ignored
    );
    assert_eq!(
        encounter.handle(EncounterInput::SelectAction(7)).unwrap(),
        Step::Ignored
    );
    assert_eq!(
        encounter.handle(EncounterInput::Continue).unwrap(),
        Step::Ignored
    );
    assert!(matches!(
        encounter.phase(),
        EncounterPhase::SelectingAction { .. }
    ));
}

#[test]
fn failed_strike_passes_the_turn_to_monsters() {
    let fixture = Fixture::new(Vec::new());
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 4);

    let events = strike(&mut encounter, [FAIL, FAIL]);
    let report = report(&events);
    assert_eq!(report.tier, ResultTier::PartlyFailure);
    assert!(report.had_no_effect());
    assert_eq!(
        encounter.phase(),
        &EncounterPhase::Waiting(WaitReason::TurnEnded {
            next: Side::Monsters
        })
    );
}

#[test]
fn failed_parry_takes_monster_damage() {
    let fixture = Fixture::new(Vec::new());
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 5);

    strike(&mut encounter, [FAIL, FAIL]);
    let events = parry(&mut encounter, [FAIL, FAIL]);
    assert!(events.contains(&EncounterEvent::MonsterAttacks {
        monster: MonsterId(0),
        target: PartySlot(0)
    }));
    assert_eq!(report(&events).tier, ResultTier::PartlyFailure);
    assert_eq!(encounter.party()[0].state.health.current(), 9);
}

#[test]
fn stunned_monster_loses_its_next_turn() {
    let fixture = Fixture::new(Vec::new());
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 6);

    strike(&mut encounter, [FAIL, FAIL]);
    parry(&mut encounter, [PASS, PASS]);
    assert!(encounter.monsters()[0].stunned);

    strike(&mut encounter, [FAIL, FAIL]);
    let events = advanced(encounter.handle(EncounterInput::Continue).unwrap());
    assert!(events.contains(&EncounterEvent::MonsterStunned {
        monster: MonsterId(0)
    }));
    assert!(!encounter.monsters()[0].stunned);
    assert_eq!(
        encounter.phase(),
        &EncounterPhase::Waiting(WaitReason::TurnEnded {
            next: Side::Players
        })
    );
}

#[test]
fn exhaustion_escalates_and_resets_after_the_fight() {
    let fixture = Fixture::new(Vec::new());
    let mut party = vec![knight(0, 10)];
    {
        let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 2)], 7);

        strike(&mut encounter, [FAIL, FAIL]);
        parry(&mut encounter, [FAIL, PASS]);
        assert_eq!(encounter.party()[0].exhaustion_level, 1);
        assert_eq!(encounter.party()[0].state.health.current(), 9);

        strike(&mut encounter, [FAIL, FAIL]);
        parry(&mut encounter, [FAIL, PASS]);
        assert_eq!(encounter.party()[0].exhaustion_level, 2);
        assert_eq!(encounter.party()[0].state.health.current(), 7);

        let events = strike(&mut encounter, [PASS, PASS]);
        assert!(events.contains(&EncounterEvent::Victory));
    }
    assert_eq!(party[0].exhaustion_level, 0);
    assert_eq!(party[0].state.health.current(), 7);
}

#[test]
fn last_player_falling_is_a_defeat() {
    let fixture = Fixture::new(Vec::new());
    let mut party = vec![knight(0, 1)];
    {
        let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 8);

        strike(&mut encounter, [FAIL, FAIL]);
        let events = parry(&mut encounter, [FAIL, FAIL]);
        assert_eq!(report(&events).fallen, vec![PartySlot(0)]);
        assert_eq!(events.last(), Some(&EncounterEvent::Defeat));
        assert!(encounter.is_finished());
    }
    assert!(!party[0].is_alive());
}

#[test]
fn monster_hits_undefended_without_reactions() {
    let fixture = Fixture::without_reactions();
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 9);

    strike(&mut encounter, [FAIL, FAIL]);
    let events = advanced(encounter.handle(EncounterInput::Continue).unwrap());
    assert!(events.contains(&EncounterEvent::UndefendedHit {
        monster: MonsterId(0),
        target: PartySlot(0),
        damage: 1
    }));
    assert_eq!(encounter.party()[0].state.health.current(), 9);
}

#[test]
fn monster_ledger_gives_the_next_attacker_advantage() {
    let fixture = Fixture::new(vec![rule(
        "strike",
        ResultTier::PartlyFailure,
        vec![Outcome::EnemyAttackedWithAdvantage],
    )]);
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 10);

    strike(&mut encounter, [FAIL, FAIL]);
    assert_eq!(encounter.monsters()[0].state.ledger.attack_advantage, 1);
    parry(&mut encounter, [PASS, FAIL]);

    // 91 on its own fails against 50; advantage re-pairs it as 19.
    advanced(encounter.handle(EncounterInput::Continue).unwrap());
    advanced(encounter.handle(EncounterInput::SelectAction(0)).unwrap());
    encounter.roller_mut().force_draws(DigitPair::new(9, 1));
    encounter.roller_mut().force_result(FAIL);
    let events = advanced(encounter.handle(EncounterInput::SelectTarget(0)).unwrap());

    let report = report(&events);
    assert_eq!(report.checks[0].roll.value, 19);
    assert!(report.checks[0].passed);
    assert_eq!(report.tier, ResultTier::PartlySuccess);
    assert!(encounter.monsters()[0].state.ledger.is_clear());
}

#[test]
fn actor_ledger_is_cleared_after_acting() {
    let fixture = Fixture::new(vec![rule(
        "strike",
        ResultTier::PartlyFailure,
        vec![Outcome::GainAdvantage(game_core::LedgerScope::Attack)],
    )]);
    let mut party = vec![knight(0, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 11);

    let events = strike(&mut encounter, [FAIL, FAIL]);
    assert_eq!(report(&events).applied.len(), 1);
    assert!(encounter.party()[0].state.ledger.is_clear());
}

#[test]
fn taunted_monster_attacks_the_taunter() {
    let fixture = Fixture::new(vec![rule(
        "strike",
        ResultTier::PartlyFailure,
        vec![Outcome::TauntEnemy],
    )]);
    let mut party = vec![knight(0, 10), knight(1, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 12);

    let started = advanced(encounter.handle(EncounterInput::Continue).unwrap());
    let taunter = started
        .iter()
        .find_map(|event| match event {
            EncounterEvent::TurnStarted {
                actor: CombatantId::Player(slot),
            } => Some(*slot),
            _ => None,
        })
        .expect("a player turn started");
    advanced(encounter.handle(EncounterInput::SelectAction(0)).unwrap());
    encounter.roller_mut().force_result(FAIL);
    encounter.roller_mut().force_result(FAIL);
    advanced(encounter.handle(EncounterInput::SelectTarget(0)).unwrap());

    let events = advanced(encounter.handle(EncounterInput::Continue).unwrap());
    assert!(events.contains(&EncounterEvent::MonsterAttacks {
        monster: MonsterId(0),
        target: taunter
    }));
}

#[test]
fn every_player_acts_once_per_cycle() {
    let fixture = Fixture::without_reactions();
    let mut party = vec![knight(0, 10), knight(1, 10)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 10)], 13);

    let mut actors = Vec::new();
    for _ in 0..2 {
        let events = strike(&mut encounter, [FAIL, FAIL]);
        actors.push(report(&events).actor);
        advanced(encounter.handle(EncounterInput::Continue).unwrap());
    }
    actors.sort();
    assert_eq!(actors, vec![PartySlot(0), PartySlot(1)]);

    let events = advanced(encounter.handle(EncounterInput::Continue).unwrap());
    assert!(events.contains(&EncounterEvent::CycleReset {
        side: Side::Players
    }));
}

#[test]
fn dead_taunter_is_not_forced() {
    let fixture = Fixture::new(vec![rule(
        "strike",
        ResultTier::PartlyFailure,
        vec![Outcome::TauntEnemy, Outcome::TakeDamage],
    )]);
    let mut party = vec![knight(0, 1), knight(1, 1)];
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 5)], 14);

    let events = strike(&mut encounter, [FAIL, FAIL]);
    let taunter = report(&events).actor;
    assert_eq!(report(&events).fallen, vec![taunter]);
    assert_eq!(encounter.monsters()[0].taunted_by, Some(taunter));

    let survivor = encounter
        .party()
        .iter()
        .find(|player| player.is_alive())
        .map(|player| player.slot)
        .expect("one knight survives");
    let events = advanced(encounter.handle(EncounterInput::Continue).unwrap());
    assert!(events.contains(&EncounterEvent::MonsterAttacks {
        monster: MonsterId(0),
        target: survivor
    }));
}

#[test]
fn fallen_members_never_act() {
    let fixture = Fixture::without_reactions();
    let mut party = vec![knight(0, 10), knight(1, 10)];
    party[0].state.health.damage(10);
    assert!(!party[0].is_alive());
    let mut encounter = Encounter::new(fixture.env(), &mut party, [ghoul(0, 10)], 15);

    for _ in 0..6 {
        let events = strike(&mut encounter, [FAIL, FAIL]);
        assert!(!events.contains(&EncounterEvent::TurnStarted {
            actor: CombatantId::Player(PartySlot(0))
        }));
        assert_eq!(report(&events).actor, PartySlot(1));

        let events = advanced(encounter.handle(EncounterInput::Continue).unwrap());
        assert!(events.contains(&EncounterEvent::UndefendedHit {
            monster: MonsterId(0),
            target: PartySlot(1),
            damage: 1
        }));
    }
    assert_eq!(encounter.party()[0].state.health.current(), 0);
    assert_eq!(encounter.party()[1].state.health.current(), 4);
}
