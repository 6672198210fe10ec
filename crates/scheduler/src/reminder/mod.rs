mod cancel_event_notifications;
mod cleanup_notification_references;
mod schedule_event_notifications;
mod sync_event_reminders;

pub use cancel_event_notifications::CancelEventNotificationsUseCase;
pub use cleanup_notification_references::{
    CleanupNotificationReferencesUseCase, REFERENCE_RETENTION_MILLIS,
};
pub use schedule_event_notifications::{schedule_event_notifications, REMINDER_TITLE};
pub use sync_event_reminders::SyncEventRemindersUseCase;
