//! Mentor training with diminishing returns.

use crate::config::GameConfig;

use super::attributes::{Attribute, AttributeSet};

/// Attribute gain for a lesson with `base` value at `current` attribute level.
///
/// `max(1, round(base * (1 - current / 100)))`, rounding half to even, so the
/// gain shrinks as the attribute approaches the cap but never reaches zero.
pub fn upgrade_value(base: u8, current: u8) -> u8 {
    let remaining = 100 - u32::from(current.min(GameConfig::MAX_ATTRIBUTE));
    let scaled = u32::from(base) * remaining;
    let (quotient, remainder) = (scaled / 100, scaled % 100);
    let rounded = if remainder > 50 || (remainder == 50 && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded.clamp(1, u32::from(u8::MAX)) as u8
}

/// A rescued prisoner who can teach one attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mentor {
    pub name: String,
    pub archetype: String,
    pub attribute: Attribute,
    pub base_upgrade: u8,
}

/// Outcome of one lesson.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lesson {
    pub attribute: Attribute,
    pub before: u8,
    pub after: u8,
}

impl Lesson {
    pub fn gained(&self) -> u8 {
        self.after - self.before
    }
}

impl Mentor {
    const DEFAULT_TEACHING: (Attribute, u8) = (Attribute::Force, 40);

    /// Builds a mentor whose lesson is determined by the archetype
    /// (case-insensitive). Unknown archetypes teach Force at 40.
    pub fn for_archetype(name: impl Into<String>, archetype: impl Into<String>) -> Self {
        let archetype = archetype.into();
        let (attribute, base_upgrade) = Self::teaching(&archetype.to_ascii_lowercase());
        Self {
            name: name.into(),
            archetype,
            attribute,
            base_upgrade,
        }
    }

    fn teaching(archetype: &str) -> (Attribute, u8) {
        match archetype {
            "warrior" => (Attribute::Force, 50),
            "thief" => (Attribute::Reflexe, 50),
            "cleric" => (Attribute::Willpower, 45),
            "ranger" => (Attribute::Perception, 45),
            "paladin" => (Attribute::Stamina, 45),
            "bard" => (Attribute::Heart, 40),
            "monk" => (Attribute::Stamina, 55),
            "druid" => (Attribute::Willpower, 45),
            "warlock" => (Attribute::Heart, 55),
            "barbarian" => (Attribute::Force, 55),
            "beggar" => (Attribute::Perception, 45),
            "dancer" => (Attribute::Reflexe, 55),
            _ => Self::DEFAULT_TEACHING,
        }
    }

    /// Gain this mentor would give at the current attribute value.
    pub fn preview(&self, attributes: &AttributeSet) -> u8 {
        upgrade_value(self.base_upgrade, attributes.get(self.attribute))
    }

    /// Trains the mentor's attribute, capped at the attribute maximum.
    pub fn teach(&self, attributes: &mut AttributeSet) -> Lesson {
        let before = attributes.get(self.attribute);
        let after = before
            .saturating_add(self.preview(attributes))
            .min(GameConfig::MAX_ATTRIBUTE);
        attributes.set(self.attribute, after);
        Lesson {
            attribute: self.attribute,
            before,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_diminishes_but_never_vanishes() {
        assert_eq!(upgrade_value(50, 0), 50);
        assert_eq!(upgrade_value(50, 40), 30);
        assert_eq!(upgrade_value(55, 90), 6); // 5.5 rounds to even
        assert_eq!(upgrade_value(45, 90), 4); // 4.5 rounds to even
        assert_eq!(upgrade_value(40, 99), 1);
        assert_eq!(upgrade_value(40, 100), 1);
    }

    #[test]
    fn archetypes_pick_lessons() {
        let monk = Mentor::for_archetype("Old Wen", "Monk");
        assert_eq!((monk.attribute, monk.base_upgrade), (Attribute::Stamina, 55));

        let stranger = Mentor::for_archetype("Nobody", "tax collector");
        assert_eq!((stranger.attribute, stranger.base_upgrade), (Attribute::Force, 40));
    }

    #[test]
    fn teaching_caps_at_maximum() {
        let warrior = Mentor::for_archetype("Brom", "warrior");
        let mut attributes = AttributeSet::default().with(Attribute::Force, 99);
        let lesson = warrior.teach(&mut attributes);
        assert_eq!(lesson.before, 99);
        assert_eq!(lesson.after, 100);
        assert_eq!(lesson.gained(), 1);
        assert_eq!(attributes.force, 100);

        let again = warrior.teach(&mut attributes);
        assert_eq!(again.after, 100);
    }
}
