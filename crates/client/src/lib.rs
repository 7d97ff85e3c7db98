//! Terminal client for Gutter Knight.
//!
//! The binary is the composition root: it resolves configuration, loads
//! content, builds a [`runtime::Session`] with the auto-pilot, and prints the
//! session's events as they are drained from the bus.
pub mod config;
pub mod report;

pub use config::{Cli, ClientConfig, default_config_path};
pub use report::Narrator;

use game_core::{Lesson, Mentor};
use runtime::Session;

/// Trains the party once per archetype before the first encounter.
///
/// Each mentor teaches the party member weakest in the mentor's attribute;
/// ties go to the earlier slot.
pub fn train_party(session: &mut Session, archetypes: &[String]) -> runtime::Result<Vec<Lesson>> {
    archetypes
        .iter()
        .map(|archetype| {
            let mentor = Mentor::for_archetype(format!("The {archetype}"), archetype.as_str());
            let slot = session
                .party()
                .iter()
                .min_by_key(|player| player.state.attributes.get(mentor.attribute))
                .map(|player| player.slot)
                .ok_or(runtime::RuntimeError::PartyDefeated)?;
            session.teach(slot, &mentor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_content::ContentBundle;
    use game_core::Attribute;

    #[test]
    fn mentors_train_the_weakest_member() {
        let mut session = Session::builder()
            .content(ContentBundle::embedded().unwrap())
            .build()
            .unwrap();
        let weakest = session
            .party()
            .iter()
            .min_by_key(|p| p.state.attributes.get(Attribute::Reflexe))
            .map(|p| p.slot)
            .unwrap();

        let lessons = train_party(&mut session, &["thief".to_owned()]).unwrap();
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].attribute, Attribute::Reflexe);
        let trained = session.party().iter().find(|p| p.slot == weakest).unwrap();
        assert_eq!(trained.state.attributes.get(Attribute::Reflexe), lessons[0].after);
    }
}
