//! Health meter shared by players and monsters.

use crate::config::GameConfig;

/// Current/maximum health, both within `[0, 10]`.
///
/// Invariant: `current <= maximum`, `maximum >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthMeter {
    current: u8,
    maximum: u8,
}

impl HealthMeter {
    pub fn new(current: u8, maximum: u8) -> Self {
        let maximum = maximum.clamp(1, GameConfig::MAX_HEALTH);
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// A full meter with the given maximum.
    pub fn full(maximum: u8) -> Self {
        Self::new(maximum, maximum)
    }

    pub const fn current(&self) -> u8 {
        self.current
    }

    pub const fn maximum(&self) -> u8 {
        self.maximum
    }

    pub const fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Below half of maximum (integer half, so 4/9 is injured and 5/10 is not).
    pub const fn is_below_half(&self) -> bool {
        self.current < self.maximum / 2
    }

    /// Removes up to `amount` health. Returns the health actually lost.
    pub fn damage(&mut self, amount: u8) -> u8 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Restores up to `amount` health without exceeding the maximum.
    /// Returns the health actually gained.
    pub fn heal(&mut self, amount: u8) -> u8 {
        let gained = amount.min(self.maximum - self.current);
        self.current += gained;
        gained
    }

    pub fn restore(&mut self) {
        self.current = self.maximum;
    }
}

impl Default for HealthMeter {
    fn default() -> Self {
        Self::full(GameConfig::MAX_HEALTH)
    }
}

impl core::fmt::Display for HealthMeter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}
