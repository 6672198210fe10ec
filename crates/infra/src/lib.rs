mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    FileKeyValueStore, IEventStore, IKeyValueStore, INotificationRefRepo, InMemoryEventStore,
    InMemoryKeyValueStore, KeyValueNotificationRefRepo, Repos, NOTIFICATION_KEY_PREFIX,
};
pub use services::{
    INotificationService, InMemoryNotificationService, NotificationRequest, ScheduledNotification,
};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

/// Everything the reminder use cases need: repositories, the device
/// notification bridge, configuration and a mockable clock.
#[derive(Clone)]
pub struct PetIdContext {
    pub repos: Repos,
    pub notifications: Arc<dyn INotificationService>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

/// Device capabilities the host app injects when wiring the context.
pub struct ContextParams {
    pub notification_service: Arc<dyn INotificationService>,
    pub event_store: Arc<dyn IEventStore>,
}

impl PetIdContext {
    /// Wires a context from the injected device services and the
    /// environment. The reference index is file-backed when
    /// `REFERENCE_INDEX_PATH` is set, otherwise in-memory.
    pub fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new();
        let repos = Repos::create(params.event_store, config.reference_index_path.as_deref())?;
        Ok(Self {
            repos,
            notifications: params.notification_service,
            config,
            sys: Arc::new(RealSys {}),
        })
    }
}

/// Fully in-memory context. Used by tests and by callers that do not
/// need the reference index to survive an app restart.
pub fn setup_context() -> PetIdContext {
    PetIdContext {
        repos: Repos::create_inmemory(),
        notifications: Arc::new(InMemoryNotificationService::new()),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
    }
}
