use crate::shared::usecase::UseCase;
use petid_reminders_infra::PetIdContext;
use tracing::error;

/// Reference entries are kept this long past their fire time before the
/// bookkeeping is purged: 24 hours.
pub const REFERENCE_RETENTION_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Garbage collection for the reference index. Purges entries whose fire
/// time is more than the retention window in the past, whether or not the
/// underlying notification fired or was cancelled. Never touches the
/// notification service.
#[derive(Debug)]
pub struct CleanupNotificationReferencesUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for CleanupNotificationReferencesUseCase {
    /// Number of references purged
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "CleanupNotificationReferences";

    async fn execute(&mut self, ctx: &PetIdContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let references = ctx.repos.notification_refs.all().await.map_err(|e| {
            error!("Unable to list notification references. Err: {:?}", e);
            UseCaseError::StorageError
        })?;

        let mut purged = 0;
        for reference in references {
            if now - reference.fires_at <= REFERENCE_RETENTION_MILLIS {
                continue;
            }
            match ctx
                .repos
                .notification_refs
                .delete(&reference.notification_id)
                .await
            {
                Ok(_) => purged += 1,
                Err(e) => error!(
                    "Unable to purge reference for notification {}. Err: {:?}",
                    reference.notification_id, e
                ),
            }
        }

        Ok(purged)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use petid_reminders_domain::{NotificationPayload, ScheduledReminder};
    use petid_reminders_infra::{setup_context, ISys, NotificationRequest};
    use std::sync::Arc;

    const NOW: i64 = 1717977600000; // 2024-06-10 00:00:00 UTC
    const HOUR_MILLIS: i64 = 60 * 60 * 1000;

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    fn setup() -> PetIdContext {
        let mut ctx = setup_context();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        ctx
    }

    fn reference(fires_at: i64) -> ScheduledReminder {
        ScheduledReminder {
            notification_id: Default::default(),
            event_id: Default::default(),
            owner_user_id: Default::default(),
            fires_at,
            offset_minutes: 60,
        }
    }

    #[tokio::test]
    async fn purges_only_entries_older_than_the_retention_window() {
        let ctx = setup();
        let refs = &ctx.repos.notification_refs;

        let kept_future = reference(NOW + HOUR_MILLIS);
        let kept_recent = reference(NOW - 23 * HOUR_MILLIS);
        let kept_boundary = reference(NOW - 24 * HOUR_MILLIS);
        let purged_stale = reference(NOW - 25 * HOUR_MILLIS);

        for r in [&kept_future, &kept_recent, &kept_boundary, &purged_stale] {
            refs.insert(r).await.unwrap();
        }

        let purged = execute(CleanupNotificationReferencesUseCase, &ctx)
            .await
            .unwrap();
        assert_eq!(purged, 1);

        let remaining = refs.all().await.unwrap();
        assert_eq!(remaining.len(), 3);
        assert!(remaining
            .iter()
            .all(|r| r.notification_id != purged_stale.notification_id));
    }

    #[tokio::test]
    async fn never_touches_scheduled_notifications() {
        let ctx = setup();
        let notification_id = ctx
            .notifications
            .schedule_at(NotificationRequest {
                fires_at: NOW - 48 * HOUR_MILLIS,
                title: "Upcoming Event".into(),
                body: "Checkup".into(),
                payload: NotificationPayload {
                    event_id: Default::default(),
                    owner_user_id: Default::default(),
                    offset_minutes: 60,
                },
            })
            .await
            .unwrap();
        let mut stale = reference(NOW - 48 * HOUR_MILLIS);
        stale.notification_id = notification_id.clone();
        ctx.repos.notification_refs.insert(&stale).await.unwrap();

        execute(CleanupNotificationReferencesUseCase, &ctx)
            .await
            .unwrap();

        // Bookkeeping only: the device notification itself is left alone
        assert!(ctx.repos.notification_refs.all().await.unwrap().is_empty());
        let scheduled = ctx.notifications.list_scheduled().await.unwrap();
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].id, notification_id);
    }

    #[tokio::test]
    async fn empty_index_is_a_no_op() {
        let ctx = setup();
        let purged = execute(CleanupNotificationReferencesUseCase, &ctx)
            .await
            .unwrap();
        assert_eq!(purged, 0);
    }
}
