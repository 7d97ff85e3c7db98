/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Damage, healing and other per-outcome magnitudes.
    pub combat: CombatConfig,
    /// Encounter sizing and monster ecosystem tuning.
    pub encounters: EncounterRules,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of monsters alive in one encounter.
    pub const MAX_MONSTERS: usize = 8;
    /// Maximum party size.
    pub const MAX_PARTY: usize = 4;
    /// Checks performed per resolved action (success + critical/fumble).
    pub const CHECKS_PER_ACTION: usize = 2;

    // ===== value bounds =====
    pub const MIN_ATTRIBUTE: u8 = 1;
    pub const MAX_ATTRIBUTE: u8 = 100;
    pub const MAX_HEALTH: u8 = 10;

    pub fn new() -> Self {
        Self::default()
    }
}

/// Magnitudes used when outcomes are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Damage a player deals with a normal hit when the party file omits it.
    pub player_damage: u8,
    /// Damage a monster deals when its template omits it.
    pub monster_damage: u8,
    /// Health restored by a self-heal outcome.
    pub heal_amount: u8,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAYER_DAMAGE: u8 = 1;
    pub const DEFAULT_MONSTER_DAMAGE: u8 = 1;
    pub const DEFAULT_HEAL_AMOUNT: u8 = 1;
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player_damage: Self::DEFAULT_PLAYER_DAMAGE,
            monster_damage: Self::DEFAULT_MONSTER_DAMAGE,
            heal_amount: Self::DEFAULT_HEAL_AMOUNT,
        }
    }
}

/// Encounter sizing and ecosystem parameters.
///
/// Chances are integer percentages (0-100) so every draw stays on the
/// deterministic integer RNG.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncounterRules {
    /// Minimum number of monsters in an encounter.
    pub min_monsters: u8,
    /// Maximum number of monsters in an encounter (capped at `MAX_MONSTERS`).
    pub max_monsters: u8,
    /// Maximum distinct monster types in one encounter.
    pub max_types: u8,
    /// Wandering types tolerated before extinction events can happen. Zero
    /// counts as one.
    pub max_wandering_types: u8,
    /// Chance per day advance that an overcrowded ecosystem loses a type.
    pub extinction_chance: u8,
    /// Chance per day advance that a rare type becomes common.
    pub promotion_chance: u8,
}

impl Default for EncounterRules {
    fn default() -> Self {
        Self {
            min_monsters: 1,
            max_monsters: GameConfig::MAX_MONSTERS as u8,
            max_types: 3,
            max_wandering_types: 6,
            extinction_chance: 40,
            promotion_chance: 20,
        }
    }
}

impl EncounterRules {
    /// Returns `(min, max)` monster counts, clamped to a valid non-empty range.
    pub fn monster_count_range(&self) -> (u8, u8) {
        let max = self.max_monsters.clamp(1, GameConfig::MAX_MONSTERS as u8);
        let min = self.min_monsters.clamp(1, max);
        (min, max)
    }
}
