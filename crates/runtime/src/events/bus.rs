//! Topic-based event bus implementation.

use game_core::EncounterEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::SessionEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Everything the encounter engine emits
    Encounter,
    /// Encounter boundaries, rests, ecosystem changes, training
    Session,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Encounter(EncounterEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Encounter(_) => Topic::Encounter,
            Event::Session(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events sent while nobody
/// listens are dropped.
#[derive(Clone)]
pub struct EventBus {
    encounter: broadcast::Sender<Event>,
    session: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            encounter: broadcast::channel(capacity).0,
            session: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Encounter => &self.encounter,
            Topic::Session => &self.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("encounter_subscribers", &self.encounter.receiver_count())
            .field("session_subscribers", &self.session.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut encounter = bus.subscribe(Topic::Encounter);
        let mut session = bus.subscribe(Topic::Session);

        bus.publish(Event::Encounter(EncounterEvent::Victory));
        bus.publish(Event::Session(SessionEvent::Rested { day: 2 }));

        assert!(matches!(
            encounter.recv().await.unwrap(),
            Event::Encounter(EncounterEvent::Victory)
        ));
        assert!(encounter.try_recv().is_err());
        assert!(matches!(
            session.recv().await.unwrap(),
            Event::Session(SessionEvent::Rested { day: 2 })
        ));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::new().publish(Event::Encounter(EncounterEvent::Defeat));
    }
}
