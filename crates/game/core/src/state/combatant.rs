//! Players and monsters.

use crate::config::GameConfig;
use crate::stats::{AttributeSet, HealthMeter};

use super::ledger::StatusLedger;

/// Index of a player within the party.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartySlot(pub u8);

impl PartySlot {
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for PartySlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Stable monster identifier, unique within an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterId(pub u16);

impl core::fmt::Display for MonsterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/// Either side of a fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantId {
    Player(PartySlot),
    Monster(MonsterId),
}

impl CombatantId {
    /// Numeric id mixed into RNG seeds. Players and monsters never collide.
    pub const fn seed_id(&self) -> u32 {
        match self {
            Self::Player(slot) => slot.0 as u32,
            Self::Monster(id) => 0x1_0000 | id.0 as u32,
        }
    }
}

impl core::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Player(slot) => write!(f, "{slot}"),
            Self::Monster(id) => write!(f, "{id}"),
        }
    }
}

/// State every combatant carries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub name: String,
    pub attributes: AttributeSet,
    pub health: HealthMeter,
    /// Already acted in the current cycle.
    pub has_acted: bool,
    pub ledger: StatusLedger,
}

impl CombatantState {
    pub fn new(name: impl Into<String>, attributes: AttributeSet, health: HealthMeter) -> Self {
        Self {
            name: name.into(),
            attributes,
            health,
            has_acted: false,
            ledger: StatusLedger::default(),
        }
    }
}

/// Shared view over players and monsters.
pub trait Combatant {
    fn id(&self) -> CombatantId;
    fn state(&self) -> &CombatantState;
    fn state_mut(&mut self) -> &mut CombatantState;

    fn name(&self) -> &str {
        &self.state().name
    }

    fn is_alive(&self) -> bool {
        self.state().health.is_alive()
    }

    /// Alive and has not acted this cycle.
    fn can_act(&self) -> bool {
        self.is_alive() && !self.state().has_acted
    }
}

/// A party member. Players persist between encounters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub slot: PartySlot,
    pub state: CombatantState,
    /// Damage dealt by a normal hit.
    pub damage: u8,
    /// Times exhaustion damage was taken this encounter.
    pub exhaustion_level: u8,
}

impl Player {
    pub fn new(
        slot: PartySlot,
        name: impl Into<String>,
        attributes: AttributeSet,
        max_health: u8,
    ) -> Self {
        Self {
            slot,
            state: CombatantState::new(name, attributes, HealthMeter::full(max_health)),
            damage: 1,
            exhaustion_level: 0,
        }
    }

    #[must_use]
    pub fn with_damage(mut self, damage: u8) -> Self {
        self.damage = damage;
        self
    }
}

impl Combatant for Player {
    fn id(&self) -> CombatantId {
        CombatantId::Player(self.slot)
    }

    fn state(&self) -> &CombatantState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }
}

/// A monster spawned for one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: MonsterId,
    pub state: CombatantState,
    pub damage: u8,
    /// Player whose taunt forces this monster's target.
    pub taunted_by: Option<PartySlot>,
    /// Loses its next turn.
    pub stunned: bool,
}

impl Combatant for Monster {
    fn id(&self) -> CombatantId {
        CombatantId::Monster(self.id)
    }

    fn state(&self) -> &CombatantState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CombatantState {
        &mut self.state
    }
}

/// Blueprint monsters are spawned from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default = "MonsterTemplate::default_health"))]
    pub max_health: u8,
    /// Falls back to the configured monster damage when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: AttributeSet,
}

impl MonsterTemplate {
    #[cfg(feature = "serde")]
    fn default_health() -> u8 {
        GameConfig::MAX_HEALTH / 2
    }

    pub fn new(name: impl Into<String>, max_health: u8, attributes: AttributeSet) -> Self {
        Self {
            name: name.into(),
            max_health,
            damage: None,
            attributes,
        }
    }

    /// Instantiates the template at full health.
    pub fn spawn(&self, id: MonsterId, config: &GameConfig) -> Monster {
        Monster {
            id,
            state: CombatantState::new(
                self.name.clone(),
                self.attributes.normalized(),
                HealthMeter::full(self.max_health),
            ),
            damage: self.damage.unwrap_or(config.combat.monster_damage),
            taunted_by: None,
            stunned: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_starts_fresh() {
        let template = MonsterTemplate::new("Rat", 3, AttributeSet::uniform(30));
        let rat = template.spawn(MonsterId(4), &GameConfig::default());
        assert_eq!(rat.state.health.current(), 3);
        assert_eq!(rat.damage, 1);
        assert!(rat.can_act());
        assert_eq!(rat.id(), CombatantId::Monster(MonsterId(4)));
    }

    #[test]
    fn seed_ids_are_disjoint() {
        let player = CombatantId::Player(PartySlot(3));
        let monster = CombatantId::Monster(MonsterId(3));
        assert_ne!(player.seed_id(), monster.seed_id());
    }

    #[test]
    fn dead_combatants_cannot_act() {
        let mut knight = Player::new(PartySlot(0), "Knight", AttributeSet::default(), 5);
        knight.state.health.damage(5);
        assert!(!knight.is_alive());
        assert!(!knight.can_act());
    }
}
