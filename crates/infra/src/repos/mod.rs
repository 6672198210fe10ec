mod event;
mod kv;
mod notification_ref;

pub use event::{IEventStore, InMemoryEventStore};
pub use kv::{FileKeyValueStore, IKeyValueStore, InMemoryKeyValueStore};
pub use notification_ref::{
    INotificationRefRepo, KeyValueNotificationRefRepo, NOTIFICATION_KEY_PREFIX,
};

use std::path::Path;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    /// Read side of the hosted document store, used by the periodic job
    /// to fetch the event list that feeds reconciliation
    pub events: Arc<dyn IEventStore>,
    /// Local bookkeeping for notifications this component has scheduled
    pub notification_refs: Arc<dyn INotificationRefRepo>,
}

impl Repos {
    pub fn create(
        events: Arc<dyn IEventStore>,
        reference_index_path: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let kv: Arc<dyn IKeyValueStore> = match reference_index_path {
            Some(path) => Arc::new(FileKeyValueStore::open(path)?),
            None => Arc::new(InMemoryKeyValueStore::new()),
        };
        Ok(Self {
            events,
            notification_refs: Arc::new(KeyValueNotificationRefRepo::new(kv)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventStore::new()),
            notification_refs: Arc::new(KeyValueNotificationRefRepo::new(Arc::new(
                InMemoryKeyValueStore::new(),
            ))),
        }
    }
}
