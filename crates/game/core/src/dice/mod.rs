//! Percentile dice and advantage resolution.
//!
//! A roll is two ten-sided draws read as tens and ones. Advantage never
//! re-rolls: it only decides which draw plays the tens role.
mod advantage;
mod digits;
mod roller;

pub use advantage::{AdvantageCounts, ResolvedRoll, RollType, resolve_advantage};
pub use digits::{DigitDraw, DigitPair};
pub use roller::DiceRoller;
