use super::kv::IKeyValueStore;
use petid_reminders_domain::{ScheduledReminder, ID};
use std::sync::Arc;
use tracing::warn;

/// Key prefix for reference entries in the backing key-value store.
pub const NOTIFICATION_KEY_PREFIX: &str = "notification_";

/// The local reference index: bookkeeping for every notification this
/// component has scheduled, keyed by notification id.
#[async_trait::async_trait]
pub trait INotificationRefRepo: Send + Sync {
    async fn insert(&self, reminder: &ScheduledReminder) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> anyhow::Result<Option<ScheduledReminder>>;
    async fn delete(&self, notification_id: &ID) -> anyhow::Result<()>;
    /// Every parsable entry. Corrupt values are skipped with a warning,
    /// never fatal.
    async fn all(&self) -> anyhow::Result<Vec<ScheduledReminder>>;
}

pub struct KeyValueNotificationRefRepo {
    kv: Arc<dyn IKeyValueStore>,
}

impl KeyValueNotificationRefRepo {
    pub fn new(kv: Arc<dyn IKeyValueStore>) -> Self {
        Self { kv }
    }
}

fn key_for(notification_id: &ID) -> String {
    format!("{}{}", NOTIFICATION_KEY_PREFIX, notification_id)
}

fn parse_entry(key: &str, raw: &str) -> Option<ScheduledReminder> {
    match serde_json::from_str(raw) {
        Ok(reminder) => Some(reminder),
        Err(e) => {
            warn!(
                "Skipping corrupt notification reference under key {}. Err: {:?}",
                key, e
            );
            None
        }
    }
}

#[async_trait::async_trait]
impl INotificationRefRepo for KeyValueNotificationRefRepo {
    async fn insert(&self, reminder: &ScheduledReminder) -> anyhow::Result<()> {
        let raw = serde_json::to_string(reminder)?;
        self.kv.set(&key_for(&reminder.notification_id), &raw).await
    }

    async fn find(&self, notification_id: &ID) -> anyhow::Result<Option<ScheduledReminder>> {
        let key = key_for(notification_id);
        let raw = self.kv.get(&key).await?;
        Ok(raw.and_then(|raw| parse_entry(&key, &raw)))
    }

    async fn delete(&self, notification_id: &ID) -> anyhow::Result<()> {
        self.kv.remove(&key_for(notification_id)).await
    }

    async fn all(&self) -> anyhow::Result<Vec<ScheduledReminder>> {
        let keys = self.kv.list_keys().await?;
        let mut reminders = Vec::new();
        for key in keys {
            if !key.starts_with(NOTIFICATION_KEY_PREFIX) {
                continue;
            }
            match self.kv.get(&key).await? {
                Some(raw) => {
                    if let Some(reminder) = parse_entry(&key, &raw) {
                        reminders.push(reminder);
                    }
                }
                // Removed by a concurrent delete between list and get
                None => continue,
            }
        }
        Ok(reminders)
    }
}
