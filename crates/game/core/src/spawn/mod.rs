//! Monster ecosystem.
//!
//! Each monster type has a spawn state. Encounters draw from the types that
//! are currently wandering, weighted by state. Resting advances the day,
//! which can wake a waiting type, make a rare type common, or (when too many
//! types wander at once) drive the weakest one extinct.

use tracing::{debug, info, warn};

use crate::config::{EncounterRules, GameConfig};
use crate::env::{DrawContext, RngOracle, SeedSequence};
use crate::state::{Monster, MonsterId, MonsterTemplate};

/// Ecosystem status of a monster type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnState {
    /// Never appears again.
    Extinct,
    /// Spawns with its normal weight.
    Wandering,
    /// Spawns with a reduced weight.
    WanderingRare,
    /// Not spawning until its day threshold passes.
    #[default]
    Waiting,
}

impl SpawnState {
    pub const fn can_spawn(&self) -> bool {
        matches!(self, Self::Wandering | Self::WanderingRare)
    }
}

/// A monster type and its ecosystem bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    pub template: MonsterTemplate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: SpawnState,
    /// Day from which a waiting type may appear. Also ranks strength.
    #[cfg_attr(feature = "serde", serde(default = "SpawnEntry::default_threshold"))]
    pub day_threshold: u32,
    /// Weight when wandering (100 = normal).
    #[cfg_attr(feature = "serde", serde(default = "SpawnEntry::default_normal_weight"))]
    pub normal_weight: u32,
    /// Percentage of the normal weight used while rare.
    #[cfg_attr(feature = "serde", serde(default = "SpawnEntry::default_rare_weight"))]
    pub rare_weight: u32,
}

impl SpawnEntry {
    #[cfg(feature = "serde")]
    fn default_threshold() -> u32 {
        1
    }

    fn default_normal_weight() -> u32 {
        100
    }

    fn default_rare_weight() -> u32 {
        30
    }

    pub fn new(template: MonsterTemplate, state: SpawnState, day_threshold: u32) -> Self {
        Self {
            template,
            state,
            day_threshold,
            normal_weight: Self::default_normal_weight(),
            rare_weight: Self::default_rare_weight(),
        }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Effective selection weight for the current state.
    pub fn weight(&self) -> u32 {
        match self.state {
            SpawnState::Wandering => self.normal_weight,
            SpawnState::WanderingRare => {
                let scaled = u64::from(self.normal_weight) * u64::from(self.rare_weight) / 100;
                u32::try_from(scaled).unwrap_or(u32::MAX)
            }
            SpawnState::Waiting | SpawnState::Extinct => 0,
        }
    }
}

/// Ecosystem change announced to the player after a rest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnAnnouncement {
    /// A waiting type started to appear rarely.
    Rumor { monster: String },
    /// A rare type became common.
    Common { monster: String },
    /// A type was wiped out by a stronger one.
    Extinction { monster: String, killed_by: String },
}

impl core::fmt::Display for SpawnAnnouncement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rumor { monster } => write!(
                f,
                "You hear rumors that {monster} found their way into the dungeon"
            ),
            Self::Common { monster } => {
                write!(f, "The dungeon is full of sounds of wandering {monster}")
            }
            Self::Extinction { monster, killed_by } => write!(
                f,
                "You hear screams of {monster}, later you find their remains torn into pieces by {killed_by}"
            ),
        }
    }
}

/// Counts per spawn state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EcosystemStatus {
    pub wandering: usize,
    pub wandering_rare: usize,
    pub waiting: usize,
    pub extinct: usize,
    pub overcrowded: bool,
}

/// All monster types known to the dungeon.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnTable {
    entries: Vec<SpawnEntry>,
}

impl SpawnTable {
    pub fn new(entries: Vec<SpawnEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&SpawnEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Overrides the state of the named type. Returns false if unknown.
    pub fn set_state(&mut self, name: &str, state: SpawnState) -> bool {
        match self.entries.iter_mut().find(|entry| entry.name() == name) {
            Some(entry) => {
                entry.state = state;
                true
            }
            None => {
                warn!(monster = name, "unknown monster type");
                false
            }
        }
    }

    pub fn status(&self, rules: &EncounterRules) -> EcosystemStatus {
        let count = |state| self.entries.iter().filter(|e| e.state == state).count();
        let wandering = count(SpawnState::Wandering);
        EcosystemStatus {
            wandering,
            wandering_rare: count(SpawnState::WanderingRare),
            waiting: count(SpawnState::Waiting),
            extinct: count(SpawnState::Extinct),
            overcrowded: wandering > usize::from(rules.max_wandering_types.max(1)),
        }
    }

    /// Spawns the monsters of one encounter.
    ///
    /// The monster count is uniform in the configured range; up to
    /// `max_types` types are picked by weight without replacement, and each
    /// monster is a uniform pick among them. Empty when nothing can spawn.
    ///
    /// # Arguments
    ///
    /// * `config` - Encounter sizing and default monster damage
    /// * `rng` - Deterministic random source
    /// * `seeds` - Session seed sequence
    pub fn spawn_encounter(
        &self,
        config: &GameConfig,
        rng: &dyn RngOracle,
        seeds: &mut SeedSequence,
    ) -> Vec<Monster> {
        let spawnable: Vec<&SpawnEntry> =
            self.entries.iter().filter(|e| e.state.can_spawn()).collect();
        if spawnable.is_empty() {
            warn!("no spawnable monsters available");
            return Vec::new();
        }

        let rules = &config.encounters;
        let (min, max) = rules.monster_count_range();
        let count = rng.range(
            seeds.next(0, DrawContext::Spawn),
            u32::from(min),
            u32::from(max),
        );
        let types = Self::select_types(&spawnable, rules, rng, seeds);

        let monsters: Vec<Monster> = (0..count)
            .map(|n| {
                let pick = rng.index(seeds.next(n, DrawContext::Spawn), types.len());
                types[pick].template.spawn(MonsterId(n as u16), config)
            })
            .collect();
        debug!(
            count = monsters.len(),
            types = types.len(),
            "encounter spawned"
        );
        monsters
    }

    fn select_types<'t>(
        spawnable: &[&'t SpawnEntry],
        rules: &EncounterRules,
        rng: &dyn RngOracle,
        seeds: &mut SeedSequence,
    ) -> Vec<&'t SpawnEntry> {
        let wanted = rng.range(
            seeds.next(0, DrawContext::Spawn),
            1,
            u32::from(rules.max_types.max(1)),
        ) as usize;
        let mut remaining: Vec<&SpawnEntry> = spawnable.to_vec();
        let mut selected = Vec::with_capacity(wanted);
        while selected.len() < wanted && !remaining.is_empty() {
            let index = Self::weighted_index(&remaining, rng, seeds.next(0, DrawContext::Spawn));
            selected.push(remaining.remove(index));
        }
        selected
    }

    /// Index picked proportionally to weight; uniform when all weights are 0.
    fn weighted_index(options: &[&SpawnEntry], rng: &dyn RngOracle, seed: u64) -> usize {
        let total = options
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.weight()));
        if total == 0 {
            return rng.index(seed, options.len());
        }
        let mut roll = rng.range(seed, 0, total - 1);
        for (index, option) in options.iter().enumerate() {
            if roll < option.weight() {
                return index;
            }
            roll -= option.weight();
        }
        options.len() - 1
    }

    /// Advances the ecosystem to `day`.
    ///
    /// At most one state change happens per day: the first waiting type past
    /// its threshold starts wandering rarely, or else a rare type may become
    /// common. Only when neither happens can an overcrowded ecosystem lose
    /// its weakest type.
    pub fn advance_day(
        &mut self,
        day: u32,
        rules: &EncounterRules,
        rng: &dyn RngOracle,
        seeds: &mut SeedSequence,
    ) -> Option<SpawnAnnouncement> {
        for entry in &mut self.entries {
            match entry.state {
                SpawnState::Waiting if day >= entry.day_threshold => {
                    entry.state = SpawnState::WanderingRare;
                    info!(day, monster = entry.name(), "now wandering rare");
                    return Some(SpawnAnnouncement::Rumor {
                        monster: entry.template.name.clone(),
                    });
                }
                SpawnState::WanderingRare
                    if rng.chance(
                        seeds.next(day, DrawContext::Ecosystem),
                        rules.promotion_chance,
                    ) =>
                {
                    entry.state = SpawnState::Wandering;
                    info!(day, monster = entry.name(), "now wandering");
                    return Some(SpawnAnnouncement::Common {
                        monster: entry.template.name.clone(),
                    });
                }
                _ => {}
            }
        }
        self.balance_ecosystem(day, rules, rng, seeds)
    }

    fn balance_ecosystem(
        &mut self,
        day: u32,
        rules: &EncounterRules,
        rng: &dyn RngOracle,
        seeds: &mut SeedSequence,
    ) -> Option<SpawnAnnouncement> {
        let capacity = usize::from(rules.max_wandering_types.max(1));
        let mut wandering: Vec<usize> = (0..self.entries.len())
            .filter(|&i| self.entries[i].state == SpawnState::Wandering)
            .collect();
        if wandering.len() <= capacity {
            return None;
        }
        if !rng.chance(seeds.next(day, DrawContext::Ecosystem), rules.extinction_chance) {
            return None;
        }
        debug!(wandering = wandering.len(), capacity, "ecosystem overcrowded");

        // weakest first
        wandering.sort_by_key(|&i| self.entries[i].day_threshold);
        let victims = &wandering[..wandering.len() - capacity + 1];
        let victim = victims[rng.index(seeds.next(day, DrawContext::Ecosystem), victims.len())];
        let victim_threshold = self.entries[victim].day_threshold;

        let predators: Vec<usize> = wandering
            .iter()
            .rev()
            .copied()
            .filter(|&i| self.entries[i].day_threshold > victim_threshold)
            .collect();
        if predators.is_empty() {
            debug!(monster = self.entries[victim].name(), "no stronger predator");
            return None;
        }
        let predator = predators[rng.index(
            seeds.next(day, DrawContext::Ecosystem),
            predators.len().min(3),
        )];

        self.entries[victim].state = SpawnState::Extinct;
        let announcement = SpawnAnnouncement::Extinction {
            monster: self.entries[victim].template.name.clone(),
            killed_by: self.entries[predator].template.name.clone(),
        };
        info!(day, %announcement, "extinction");
        Some(announcement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::stats::AttributeSet;

    fn entry(name: &str, state: SpawnState, day: u32) -> SpawnEntry {
        SpawnEntry::new(
            MonsterTemplate::new(name, 4, AttributeSet::uniform(40)),
            state,
            day,
        )
    }

    #[test]
    fn weights_follow_state() {
        let mut rat = entry("Rat", SpawnState::Wandering, 1);
        assert_eq!(rat.weight(), 100);
        rat.state = SpawnState::WanderingRare;
        assert_eq!(rat.weight(), 30);
        rat.state = SpawnState::Extinct;
        assert_eq!(rat.weight(), 0);
    }

    #[test]
    fn spawn_respects_count_range_and_spawnable_types() {
        let table = SpawnTable::new(vec![
            entry("Rat", SpawnState::Wandering, 1),
            entry("Ghoul", SpawnState::Waiting, 5),
            entry("Slime", SpawnState::WanderingRare, 2),
        ]);
        let config = GameConfig::default();
        let mut seeds = SeedSequence::new(11);
        for _ in 0..50 {
            let monsters = table.spawn_encounter(&config, &PcgRng, &mut seeds);
            assert!((1..=8).contains(&monsters.len()));
            assert!(monsters.iter().all(|m| m.state.name != "Ghoul"));
            assert!(monsters.iter().all(|m| m.state.health.current() == 4));
        }
    }

    #[test]
    fn nothing_spawns_from_a_dormant_table() {
        let table = SpawnTable::new(vec![entry("Ghoul", SpawnState::Waiting, 5)]);
        let mut seeds = SeedSequence::new(1);
        assert!(
            table
                .spawn_encounter(&GameConfig::default(), &PcgRng, &mut seeds)
                .is_empty()
        );
    }

    #[test]
    fn waking_takes_precedence_and_happens_once_per_day() {
        let mut table = SpawnTable::new(vec![
            entry("Ghoul", SpawnState::Waiting, 2),
            entry("Troll", SpawnState::Waiting, 2),
        ]);
        let rules = EncounterRules::default();
        let mut seeds = SeedSequence::new(3);

        assert_eq!(table.advance_day(1, &rules, &PcgRng, &mut seeds), None);
        assert_eq!(
            table.advance_day(2, &rules, &PcgRng, &mut seeds),
            Some(SpawnAnnouncement::Rumor {
                monster: "Ghoul".into()
            })
        );
        assert_eq!(table.entry("Troll").unwrap().state, SpawnState::Waiting);
    }

    #[test]
    fn overcrowding_kills_a_weak_type() {
        let mut table = SpawnTable::new(
            (1..=4)
                .map(|day| entry(&format!("Type{day}"), SpawnState::Wandering, day))
                .collect(),
        );
        let rules = EncounterRules {
            max_wandering_types: 2,
            extinction_chance: 100,
            ..EncounterRules::default()
        };
        let mut seeds = SeedSequence::new(5);

        let announcement = table.advance_day(10, &rules, &PcgRng, &mut seeds);
        let Some(SpawnAnnouncement::Extinction { monster, killed_by }) = announcement else {
            panic!("expected an extinction, got {announcement:?}");
        };
        assert!(["Type1", "Type2", "Type3"].contains(&monster.as_str()));
        let victim_day = table.entry(&monster).unwrap().day_threshold;
        assert!(table.entry(&killed_by).unwrap().day_threshold > victim_day);
        assert_eq!(table.status(&rules).extinct, 1);
    }

    #[test]
    fn zero_wandering_capacity_is_treated_as_one() {
        let rules = EncounterRules {
            max_wandering_types: 0,
            extinction_chance: 100,
            ..EncounterRules::default()
        };
        let mut seeds = SeedSequence::new(5);

        let mut lone = SpawnTable::new(vec![entry("Rat", SpawnState::Wandering, 1)]);
        assert_eq!(lone.advance_day(10, &rules, &PcgRng, &mut seeds), None);
        assert_eq!(lone.entry("Rat").unwrap().state, SpawnState::Wandering);

        let mut pair = SpawnTable::new(vec![
            entry("Rat", SpawnState::Wandering, 1),
            entry("Troll", SpawnState::Wandering, 8),
        ]);
        // the troll has no stronger predator, so only the rat can die
        match pair.advance_day(10, &rules, &PcgRng, &mut seeds) {
            Some(SpawnAnnouncement::Extinction { monster, killed_by }) => {
                assert_eq!((monster.as_str(), killed_by.as_str()), ("Rat", "Troll"));
            }
            other => assert_eq!(other, None),
        }
        assert_eq!(pair.entry("Troll").unwrap().state, SpawnState::Wandering);
    }

    #[test]
    fn extreme_weights_saturate() {
        let mut huge = entry("Wyrm", SpawnState::WanderingRare, 9);
        huge.normal_weight = u32::MAX;
        huge.rare_weight = u32::MAX;
        assert_eq!(huge.weight(), u32::MAX);

        let mut common = entry("Rat", SpawnState::Wandering, 1);
        common.normal_weight = u32::MAX;
        let options = [&huge, &common];
        let mut seeds = SeedSequence::new(2);
        for _ in 0..20 {
            let seed = seeds.next(0, DrawContext::Spawn);
            let index = SpawnTable::weighted_index(&options, &PcgRng, seed);
            assert!(index < options.len());
        }
    }
}
