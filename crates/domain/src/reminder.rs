use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Lead times before an event's due moment at which reminders fire,
/// in minutes: 7 days, 1 day and 1 hour.
pub const REMINDER_OFFSETS_MINUTES: [i64; 3] = [10080, 1440, 60];

/// Data attached to every scheduled notification. Reconciliation reads it
/// back from the notification service to tell which user and event a
/// notification belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub event_id: ID,
    pub owner_user_id: ID,
    pub offset_minutes: i64,
}

/// Bookkeeping for one notification handed to the device notification
/// service. Lives in the local reference index, keyed by `notification_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReminder {
    pub notification_id: ID,
    pub event_id: ID,
    pub owner_user_id: ID,
    /// Absolute timestamp in millis at which the notification fires
    pub fires_at: i64,
    /// Which entry of `REMINDER_OFFSETS_MINUTES` this reminder represents
    pub offset_minutes: i64,
}

impl Entity for ScheduledReminder {
    fn id(&self) -> &ID {
        &self.notification_id
    }
}
