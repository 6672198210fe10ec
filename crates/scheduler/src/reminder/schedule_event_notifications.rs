use petid_reminders_domain::{
    NotificationPayload, PetEvent, ScheduledReminder, ID, REMINDER_OFFSETS_MINUTES,
};
use petid_reminders_infra::{NotificationRequest, PetIdContext};
use tracing::{error, warn};

/// Title shown on every event reminder notification
pub const REMINDER_TITLE: &str = "Upcoming Event";

/// Schedules the still-future reminders for a single event and records a
/// reference for each created notification. Offsets whose fire time has
/// already passed are skipped, and a failing offset is logged without
/// aborting the remaining ones. Returns the created notification ids.
pub async fn schedule_event_notifications(event: &PetEvent, ctx: &PetIdContext) -> Vec<ID> {
    let due_millis = match event.due_moment_millis(&ctx.config.timezone) {
        Some(due) => due,
        None => {
            warn!(
                "Event {} is due at a wall-clock time that does not exist in timezone {}, skipping reminders",
                event.id, ctx.config.timezone
            );
            return Vec::new();
        }
    };
    let now = ctx.sys.get_timestamp_millis();

    let mut created = Vec::new();
    for offset_minutes in &REMINDER_OFFSETS_MINUTES {
        let fires_at = due_millis - offset_minutes * 60 * 1000;
        if fires_at <= now {
            continue;
        }

        let request = NotificationRequest {
            fires_at,
            title: REMINDER_TITLE.to_string(),
            body: event.title.clone(),
            payload: NotificationPayload {
                event_id: event.id.clone(),
                owner_user_id: event.owner_user_id.clone(),
                offset_minutes: *offset_minutes,
            },
        };
        let notification_id = match ctx.notifications.schedule_at(request).await {
            Ok(id) => id,
            Err(e) => {
                error!(
                    "Unable to schedule reminder for event {} at offset {} minutes. Err: {:?}",
                    event.id, offset_minutes, e
                );
                continue;
            }
        };

        let reminder = ScheduledReminder {
            notification_id: notification_id.clone(),
            event_id: event.id.clone(),
            owner_user_id: event.owner_user_id.clone(),
            fires_at,
            offset_minutes: *offset_minutes,
        };
        if let Err(e) = ctx.repos.notification_refs.insert(&reminder).await {
            error!(
                "Unable to store reference for notification {}. Err: {:?}",
                notification_id, e
            );
        }

        created.push(notification_id);
    }

    created
}
