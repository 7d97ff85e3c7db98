//! Percentile digit draws.

/// One ten-sided die draw in `0..=9`.
///
/// The die face for a `0` draw reads "10"; the numeric value used when the
/// two draws are combined stays `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DigitDraw(u8);

impl DigitDraw {
    /// Wraps a raw draw. Values above 9 wrap modulo 10.
    pub const fn new(raw: u8) -> Self {
        Self(raw % 10)
    }

    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Face shown on the die (`1..=10`).
    pub const fn face(&self) -> u8 {
        if self.0 == 0 { 10 } else { self.0 }
    }
}

/// The two draws of a percentile roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DigitPair {
    pub tens: DigitDraw,
    pub ones: DigitDraw,
}

impl DigitPair {
    pub const fn new(tens: u8, ones: u8) -> Self {
        Self {
            tens: DigitDraw::new(tens),
            ones: DigitDraw::new(ones),
        }
    }

    /// Inverse of [`DigitPair::value`].
    ///
    /// `tens = (target / 10) % 10`, `ones = target % 10`, so a target of 100
    /// maps to the double-zero pair. Targets outside `1..=100` are clamped:
    /// `0` becomes `1` and anything above 100 becomes `100`.
    pub const fn predetermined(target: u8) -> Self {
        let target = if target == 0 {
            1
        } else if target > 100 {
            100
        } else {
            target
        };
        Self::new((target / 10) % 10, target % 10)
    }

    /// Combined value in `1..=100`; the double-zero pair reads 100.
    pub const fn value(&self) -> u8 {
        let combined = self.tens.value() * 10 + self.ones.value();
        if combined == 0 { 100 } else { combined }
    }

    /// The same draws with the tens and ones roles exchanged.
    pub const fn swapped(&self) -> Self {
        Self {
            tens: self.ones,
            ones: self.tens,
        }
    }

    /// Both draws show the same face.
    pub const fn is_mirror(&self) -> bool {
        self.tens.value() == self.ones.value()
    }
}

impl core::fmt::Display for DigitPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}|{}]={}", self.tens.face(), self.ones.face(), self.value())
    }
}
