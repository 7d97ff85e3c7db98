//! Combatant statistics.
//!
//! - `attributes`: the seven check attributes
//! - `health`: bounded health meter
//! - `progression`: mentor training between encounters
mod attributes;
mod health;
mod progression;

pub use attributes::{Attribute, AttributeSet};
pub use health::HealthMeter;
pub use progression::{Lesson, Mentor, upgrade_value};
