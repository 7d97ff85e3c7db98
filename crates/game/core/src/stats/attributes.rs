//! Primary attributes - the targets every skill check rolls against.

use strum::{EnumCount, EnumIter};

use crate::config::GameConfig;

/// Attributes a player action can check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Attribute {
    Force,
    Perception,
    Reflexe,
    Stamina,
    Reason,
    Willpower,
    Heart,
}

impl Attribute {
    /// Canonical upper-case identifier used in data files and logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Force => "FORCE",
            Self::Perception => "PERCEPTION",
            Self::Reflexe => "REFLEXE",
            Self::Stamina => "STAMINA",
            Self::Reason => "REASON",
            Self::Willpower => "WILLPOWER",
            Self::Heart => "HEART",
        }
    }

    /// Player-facing name shown on character sheets.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Force => "Force",
            Self::Perception => "Sense",
            Self::Reflexe => "Haste",
            Self::Stamina => "Stamina",
            Self::Reason => "Reason",
            Self::Willpower => "Will",
            Self::Heart => "Heart",
        }
    }
}

impl core::fmt::Display for Attribute {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute values of one combatant, each in `[1, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttributeSet {
    pub force: u8,
    pub perception: u8,
    pub reflexe: u8,
    pub stamina: u8,
    pub reason: u8,
    pub willpower: u8,
    pub heart: u8,
}

impl AttributeSet {
    pub const DEFAULT_VALUE: u8 = 50;

    /// Every attribute set to the same value (clamped to the valid range).
    pub fn uniform(value: u8) -> Self {
        let value = Self::clamp_value(value);
        Self {
            force: value,
            perception: value,
            reflexe: value,
            stamina: value,
            reason: value,
            willpower: value,
            heart: value,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Force => self.force,
            Attribute::Perception => self.perception,
            Attribute::Reflexe => self.reflexe,
            Attribute::Stamina => self.stamina,
            Attribute::Reason => self.reason,
            Attribute::Willpower => self.willpower,
            Attribute::Heart => self.heart,
        }
    }

    /// Sets an attribute, clamping into `[1, 100]`.
    pub fn set(&mut self, attribute: Attribute, value: u8) {
        let value = Self::clamp_value(value);
        let slot = match attribute {
            Attribute::Force => &mut self.force,
            Attribute::Perception => &mut self.perception,
            Attribute::Reflexe => &mut self.reflexe,
            Attribute::Stamina => &mut self.stamina,
            Attribute::Reason => &mut self.reason,
            Attribute::Willpower => &mut self.willpower,
            Attribute::Heart => &mut self.heart,
        };
        *slot = value;
    }

    /// Builder-style variant of [`AttributeSet::set`].
    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: u8) -> Self {
        self.set(attribute, value);
        self
    }

    /// Re-clamps every field. Used after deserializing hand-written data.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            force: Self::clamp_value(self.force),
            perception: Self::clamp_value(self.perception),
            reflexe: Self::clamp_value(self.reflexe),
            stamina: Self::clamp_value(self.stamina),
            reason: Self::clamp_value(self.reason),
            willpower: Self::clamp_value(self.willpower),
            heart: Self::clamp_value(self.heart),
        }
    }

    fn clamp_value(value: u8) -> u8 {
        value.clamp(GameConfig::MIN_ATTRIBUTE, GameConfig::MAX_ATTRIBUTE)
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_VALUE)
    }
}
