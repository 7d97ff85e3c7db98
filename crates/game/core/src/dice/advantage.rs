//! Advantage/disadvantage resolution.
//!
//! Stacks of advantage and disadvantage net against each other. A positive
//! net picks whichever pairing of the two draws reads lower (lower is better,
//! since a check passes when the roll is at most the target); a negative net
//! picks the higher pairing. Draws are never re-rolled, only re-paired, and a
//! mirror roll is never modified.

use core::ops::{Add, AddAssign};

use super::digits::DigitPair;

/// Effective modifier of a roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollType {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl RollType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Advantage => "advantage",
            Self::Disadvantage => "disadvantage",
        }
    }
}

/// Advantage and disadvantage stacks gathered for one check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvantageCounts {
    pub advantages: u32,
    pub disadvantages: u32,
}

impl AdvantageCounts {
    pub const fn new(advantages: u32, disadvantages: u32) -> Self {
        Self {
            advantages,
            disadvantages,
        }
    }

    /// One stack in the direction of `hint` (none for `Normal`).
    pub const fn from_hint(hint: RollType) -> Self {
        match hint {
            RollType::Normal => Self::new(0, 0),
            RollType::Advantage => Self::new(1, 0),
            RollType::Disadvantage => Self::new(0, 1),
        }
    }

    pub fn net(&self) -> i64 {
        i64::from(self.advantages) - i64::from(self.disadvantages)
    }

    /// Roll type implied by the net count. Cancelled stacks are `Normal`.
    pub fn roll_type(&self) -> RollType {
        match self.net() {
            net if net > 0 => RollType::Advantage,
            net if net < 0 => RollType::Disadvantage,
            _ => RollType::Normal,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.advantages == 0 && self.disadvantages == 0
    }
}

impl Add for AdvantageCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.advantages.saturating_add(rhs.advantages),
            self.disadvantages.saturating_add(rhs.disadvantages),
        )
    }
}

impl AddAssign for AdvantageCounts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Final reading of a roll after advantage was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedRoll {
    /// Draws as they came off the dice.
    pub natural: DigitPair,
    /// Draws in the pairing that produced `value`.
    pub applied: DigitPair,
    /// Final result in `1..=100`.
    pub value: u8,
    /// Effective roll type (always `Normal` for mirror rolls).
    pub roll_type: RollType,
    /// Stacks that went into the resolution.
    pub counts: AdvantageCounts,
}

impl ResolvedRoll {
    pub fn is_mirror(&self) -> bool {
        self.natural.is_mirror()
    }

    /// True when the draws were re-paired.
    pub fn was_swapped(&self) -> bool {
        self.applied != self.natural
    }
}

/// Resolves the final value of `draws` under `counts`.
///
/// # Arguments
///
/// * `draws` - The natural tens/ones draws
/// * `counts` - Advantage and disadvantage stacks consumed for this check
pub fn resolve_advantage(draws: DigitPair, counts: AdvantageCounts) -> ResolvedRoll {
    let natural_only = |roll_type| ResolvedRoll {
        natural: draws,
        applied: draws,
        value: draws.value(),
        roll_type,
        counts,
    };

    if draws.is_mirror() {
        return natural_only(RollType::Normal);
    }

    let swapped = draws.swapped();
    let applied = match counts.roll_type() {
        RollType::Normal => return natural_only(RollType::Normal),
        RollType::Advantage if swapped.value() < draws.value() => swapped,
        RollType::Disadvantage if swapped.value() > draws.value() => swapped,
        _ => draws,
    };

    ResolvedRoll {
        natural: draws,
        applied,
        value: applied.value(),
        roll_type: counts.roll_type(),
        counts,
    }
}
