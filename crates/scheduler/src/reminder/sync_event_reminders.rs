use super::schedule_event_notifications::schedule_event_notifications;
use crate::shared::usecase::UseCase;
use futures::future;
use petid_reminders_domain::{PetEvent, ID};
use petid_reminders_infra::{PetIdContext, ScheduledNotification};
use std::collections::HashSet;
use tracing::error;

/// Reconciles the device's scheduled notifications for one user with the
/// complete current list of that user's events: cancels reminders whose
/// event is gone and creates the still-relevant future reminders for
/// events that have none yet. Running it twice with the same input
/// schedules nothing new and cancels nothing.
#[derive(Debug)]
pub struct SyncEventRemindersUseCase {
    pub owner_user_id: ID,
    /// The complete current event list for `owner_user_id`, not a delta
    pub events: Vec<PetEvent>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotificationServiceError,
}

#[async_trait::async_trait]
impl UseCase for SyncEventRemindersUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "SyncEventReminders";

    async fn execute(&mut self, ctx: &PetIdContext) -> Result<Self::Response, Self::Error> {
        let scheduled: Vec<ScheduledNotification> = ctx
            .notifications
            .list_scheduled()
            .await
            .map_err(|e| {
                error!("Unable to list scheduled notifications. Err: {:?}", e);
                UseCaseError::NotificationServiceError
            })?
            .into_iter()
            .filter(|n| n.payload.owner_user_id == self.owner_user_id)
            .collect();

        let current_event_ids: HashSet<&ID> = self.events.iter().map(|e| &e.id).collect();

        // Notifications whose event was deleted or reassigned
        let (stale, active): (Vec<ScheduledNotification>, Vec<ScheduledNotification>) = scheduled
            .into_iter()
            .partition(|n| !current_event_ids.contains(&n.payload.event_id));

        future::join_all(stale.iter().map(|n| cancel_notification(n, ctx))).await;

        let already_scheduled: HashSet<ID> =
            active.into_iter().map(|n| n.payload.event_id).collect();

        for event in self
            .events
            .iter()
            .filter(|e| !already_scheduled.contains(&e.id))
        {
            schedule_event_notifications(event, ctx).await;
        }

        Ok(())
    }
}

async fn cancel_notification(notification: &ScheduledNotification, ctx: &PetIdContext) {
    if let Err(e) = ctx.notifications.cancel(&notification.id).await {
        // Keep the reference so the next reconciliation retries the cancel
        error!(
            "Unable to cancel notification {}. Err: {:?}",
            notification.id, e
        );
        return;
    }
    if let Err(e) = ctx.repos.notification_refs.delete(&notification.id).await {
        error!(
            "Unable to remove reference for notification {}. Err: {:?}",
            notification.id, e
        );
    }
}
