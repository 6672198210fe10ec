use crate::shared::usecase::UseCase;
use petid_reminders_domain::ID;
use petid_reminders_infra::PetIdContext;
use tracing::error;

/// Cancels every scheduled notification for one event and removes the
/// matching reference entries. The UI layer runs this when an event is
/// deleted so the owner is not left waiting for the next periodic
/// reconciliation.
#[derive(Debug)]
pub struct CancelEventNotificationsUseCase {
    pub event_id: ID,
    pub owner_user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotificationServiceError,
}

#[async_trait::async_trait]
impl UseCase for CancelEventNotificationsUseCase {
    /// Number of notifications cancelled
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelEventNotifications";

    async fn execute(&mut self, ctx: &PetIdContext) -> Result<Self::Response, Self::Error> {
        let matching: Vec<_> = ctx
            .notifications
            .list_scheduled()
            .await
            .map_err(|e| {
                error!("Unable to list scheduled notifications. Err: {:?}", e);
                UseCaseError::NotificationServiceError
            })?
            .into_iter()
            .filter(|n| {
                n.payload.owner_user_id == self.owner_user_id
                    && n.payload.event_id == self.event_id
            })
            .collect();

        let mut cancelled = 0;
        for notification in matching {
            if let Err(e) = ctx.notifications.cancel(&notification.id).await {
                error!(
                    "Unable to cancel notification {}. Err: {:?}",
                    notification.id, e
                );
                continue;
            }
            if let Err(e) = ctx.repos.notification_refs.delete(&notification.id).await {
                error!(
                    "Unable to remove reference for notification {}. Err: {:?}",
                    notification.id, e
                );
            }
            cancelled += 1;
        }

        Ok(cancelled)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::schedule_event_notifications::schedule_event_notifications;
    use crate::shared::usecase::execute;
    use chrono::prelude::*;
    use petid_reminders_domain::PetEvent;
    use petid_reminders_infra::{setup_context, ISys};
    use std::sync::Arc;

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    fn setup() -> PetIdContext {
        let mut ctx = setup_context();
        ctx.sys = Arc::new(StaticTimeSys(
            Utc.ymd(2024, 6, 1).and_hms(0, 0, 0).timestamp_millis(),
        ));
        ctx
    }

    fn event(owner_user_id: &ID) -> PetEvent {
        PetEvent {
            id: Default::default(),
            owner_user_id: owner_user_id.clone(),
            title: "Dental cleaning".into(),
            date: NaiveDate::from_ymd(2024, 6, 10),
            time: None,
        }
    }

    #[tokio::test]
    async fn cancels_only_the_requested_event() {
        let ctx = setup();
        let owner = ID::new();
        let target = event(&owner);
        let untouched = event(&owner);

        schedule_event_notifications(&target, &ctx).await;
        schedule_event_notifications(&untouched, &ctx).await;

        let usecase = CancelEventNotificationsUseCase {
            event_id: target.id.clone(),
            owner_user_id: owner.clone(),
        };
        let cancelled = execute(usecase, &ctx).await.unwrap();
        assert_eq!(cancelled, 3);

        let remaining = ctx.notifications.list_scheduled().await.unwrap();
        assert_eq!(remaining.len(), 3);
        assert!(remaining.iter().all(|n| n.payload.event_id == untouched.id));

        let references = ctx.repos.notification_refs.all().await.unwrap();
        assert!(references.iter().all(|r| r.event_id == untouched.id));
    }

    #[tokio::test]
    async fn unknown_event_cancels_nothing() {
        let ctx = setup();
        let owner = ID::new();
        schedule_event_notifications(&event(&owner), &ctx).await;

        let usecase = CancelEventNotificationsUseCase {
            event_id: ID::new(),
            owner_user_id: owner,
        };
        let cancelled = execute(usecase, &ctx).await.unwrap();
        assert_eq!(cancelled, 0);
        assert_eq!(ctx.notifications.list_scheduled().await.unwrap().len(), 3);
    }
}
