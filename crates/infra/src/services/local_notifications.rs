use petid_reminders_domain::{NotificationPayload, ID};
use std::sync::Mutex;

/// A request to schedule one local notification on the device.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    pub fires_at: i64,
    pub title: String,
    pub body: String,
    pub payload: NotificationPayload,
}

/// A notification the device reports as still scheduled.
#[derive(Debug, Clone)]
pub struct ScheduledNotification {
    pub id: ID,
    pub fires_at: i64,
    pub title: String,
    pub body: String,
    pub payload: NotificationPayload,
}

/// Bridge to the platform's local notification scheduling. The mobile
/// shell provides the real implementation; the in-memory one backs tests.
#[async_trait::async_trait]
pub trait INotificationService: Send + Sync {
    async fn schedule_at(&self, request: NotificationRequest) -> anyhow::Result<ID>;
    /// Cancelling an id the device no longer knows about is a no-op; the
    /// notification may already have fired.
    async fn cancel(&self, notification_id: &ID) -> anyhow::Result<()>;
    async fn list_scheduled(&self) -> anyhow::Result<Vec<ScheduledNotification>>;
}

pub struct InMemoryNotificationService {
    scheduled: Mutex<Vec<ScheduledNotification>>,
}

impl InMemoryNotificationService {
    pub fn new() -> Self {
        Self {
            scheduled: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryNotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotificationService for InMemoryNotificationService {
    async fn schedule_at(&self, request: NotificationRequest) -> anyhow::Result<ID> {
        let id = ID::new();
        let mut scheduled = self.scheduled.lock().unwrap();
        scheduled.push(ScheduledNotification {
            id: id.clone(),
            fires_at: request.fires_at,
            title: request.title,
            body: request.body,
            payload: request.payload,
        });
        Ok(id)
    }

    async fn cancel(&self, notification_id: &ID) -> anyhow::Result<()> {
        let mut scheduled = self.scheduled.lock().unwrap();
        scheduled.retain(|n| n.id != *notification_id);
        Ok(())
    }

    async fn list_scheduled(&self) -> anyhow::Result<Vec<ScheduledNotification>> {
        let scheduled = self.scheduled.lock().unwrap();
        Ok(scheduled.clone())
    }
}
