mod local_notifications;

pub use local_notifications::{
    INotificationService, InMemoryNotificationService, NotificationRequest, ScheduledNotification,
};
