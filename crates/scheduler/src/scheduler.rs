use crate::reminder::{
    CancelEventNotificationsUseCase, CleanupNotificationReferencesUseCase,
    SyncEventRemindersUseCase,
};
use crate::shared::usecase::execute;
use petid_reminders_domain::{PetEvent, ID};
use petid_reminders_infra::PetIdContext;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Tracks which users have a reconciliation pass in flight. A pass can be
/// triggered by a data-change callback and by the periodic timer at the
/// same time; the second caller must become a no-op instead of running a
/// duplicate pass.
#[derive(Default)]
struct UserLockMap {
    busy: Mutex<HashSet<ID>>,
}

impl UserLockMap {
    fn try_acquire(locks: &Arc<UserLockMap>, user_id: &ID) -> Option<UserLockGuard> {
        // The set stays consistent across a poisoning panic, and the facade
        // must not panic, so recover the inner value instead of unwrapping.
        let mut busy = locks
            .busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !busy.insert(user_id.clone()) {
            return None;
        }
        Some(UserLockGuard {
            locks: locks.clone(),
            user_id: user_id.clone(),
        })
    }
}

/// Clears the busy flag when dropped, so the flag is released on every
/// exit path of a reconciliation pass.
struct UserLockGuard {
    locks: Arc<UserLockMap>,
    user_id: ID,
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        let mut busy = self
            .locks
            .busy
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        busy.remove(&self.user_id);
    }
}

/// Public surface of the reminder component. Every operation is
/// best-effort background work: failures are logged and absorbed, never
/// propagated, so reminder bookkeeping can never break login or event
/// CRUD flows in the host app.
#[derive(Clone)]
pub struct ReminderScheduler {
    ctx: PetIdContext,
    reconcile_locks: Arc<UserLockMap>,
}

impl ReminderScheduler {
    pub fn new(ctx: PetIdContext) -> Self {
        Self {
            ctx,
            reconcile_locks: Arc::new(UserLockMap::default()),
        }
    }

    pub fn context(&self) -> &PetIdContext {
        &self.ctx
    }

    /// Reconciles scheduled notifications against the complete current
    /// event list for `owner_user_id`. Called on login, on every
    /// event-list mutation and on the periodic timer. A call that
    /// overlaps an in-flight reconciliation for the same user is a no-op.
    pub async fn schedule_reminders_for_near_events(
        &self,
        events: Vec<PetEvent>,
        owner_user_id: &ID,
    ) {
        let _guard = match UserLockMap::try_acquire(&self.reconcile_locks, owner_user_id) {
            Some(guard) => guard,
            None => {
                debug!(
                    "Reminder reconciliation already in progress for user {}",
                    owner_user_id
                );
                return;
            }
        };

        let usecase = SyncEventRemindersUseCase {
            owner_user_id: owner_user_id.clone(),
            events,
        };
        // Failures are logged by `execute`; the next periodic pass retries
        let _ = execute(usecase, &self.ctx).await;
    }

    /// Immediately cancels all notifications for one event. Used by the
    /// UI delete flow so cleanup does not wait for the next periodic
    /// reconciliation.
    pub async fn cancel_event_notifications(&self, event_id: &ID, owner_user_id: &ID) {
        let usecase = CancelEventNotificationsUseCase {
            event_id: event_id.clone(),
            owner_user_id: owner_user_id.clone(),
        };
        let _ = execute(usecase, &self.ctx).await;
    }

    /// Purges stale reference bookkeeping. Safe to call opportunistically,
    /// for example at app startup.
    pub async fn cleanup_notification_references(&self) {
        let _ = execute(CleanupNotificationReferencesUseCase, &self.ctx).await;
    }
}
