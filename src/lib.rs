//! Reminder scheduling for the PetID app: keeps the device's local
//! notifications in sync with a pet owner's calendar events through
//! idempotent reconciliation.

pub mod telemetry;

pub use petid_reminders_domain as domain;
pub use petid_reminders_infra as infra;
pub use petid_reminders_scheduler as scheduler;

pub use petid_reminders_domain::{PetEvent, ScheduledReminder, ID};
pub use petid_reminders_infra::{setup_context, Config, ContextParams, PetIdContext};
pub use petid_reminders_scheduler::{
    start_reference_cleanup_job, start_reminder_sync_job, ReminderScheduler,
};
