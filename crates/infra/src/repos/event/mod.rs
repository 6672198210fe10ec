use petid_reminders_domain::{PetEvent, ID};
use std::sync::Mutex;

/// Read side of the hosted document store. The host app owns all writes;
/// this component only lists a user's events to feed reconciliation.
#[async_trait::async_trait]
pub trait IEventStore: Send + Sync {
    async fn list_events(&self, owner_user_id: &ID) -> anyhow::Result<Vec<PetEvent>>;
}

pub struct InMemoryEventStore {
    events: Mutex<Vec<PetEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, event: &PetEvent) {
        let mut events = self.events.lock().unwrap();
        events.push(event.clone());
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventStore for InMemoryEventStore {
    async fn list_events(&self, owner_user_id: &ID) -> anyhow::Result<Vec<PetEvent>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| e.owner_user_id == *owner_user_id)
            .cloned()
            .collect())
    }
}
