mod job_schedulers;
mod reminder;
mod scheduler;
mod shared;

pub use job_schedulers::{start_reference_cleanup_job, start_reminder_sync_job};
pub use reminder::{
    schedule_event_notifications, CancelEventNotificationsUseCase,
    CleanupNotificationReferencesUseCase, SyncEventRemindersUseCase, REFERENCE_RETENTION_MILLIS,
    REMINDER_TITLE,
};
pub use scheduler::ReminderScheduler;
pub use shared::usecase::{execute, UseCase};
