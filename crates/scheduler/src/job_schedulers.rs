use crate::scheduler::ReminderScheduler;
use petid_reminders_domain::ID;
use std::time::Duration;
use tokio::time::interval;
use tracing::error;

/// Starts the periodic reconciliation loop for one signed-in user. The
/// first pass runs immediately (login), then repeats on the configured
/// interval. A failed event fetch is logged and retried on the next tick.
pub fn start_reminder_sync_job(scheduler: ReminderScheduler, owner_user_id: ID) {
    tokio::spawn(async move {
        let period = Duration::from_secs(scheduler.context().config.reminder_sync_interval_secs);
        let mut sync_interval = interval(period);
        loop {
            sync_interval.tick().await;

            let events = match scheduler
                .context()
                .repos
                .events
                .list_events(&owner_user_id)
                .await
            {
                Ok(events) => events,
                Err(e) => {
                    error!(
                        "Unable to list events for user {}. Err: {:?}",
                        owner_user_id, e
                    );
                    continue;
                }
            };

            scheduler
                .schedule_reminders_for_near_events(events, &owner_user_id)
                .await;
        }
    });
}

/// Purges stale notification references at startup and then once a day.
pub fn start_reference_cleanup_job(scheduler: ReminderScheduler) {
    tokio::spawn(async move {
        let mut daily_interval = interval(Duration::from_secs(24 * 60 * 60));
        loop {
            daily_interval.tick().await;
            scheduler.cleanup_notification_references().await;
        }
    });
}
