mod event;
mod reminder;
mod shared;

pub use event::{InvalidEventTimeError, PetEvent};
pub use reminder::{NotificationPayload, ScheduledReminder, REMINDER_OFFSETS_MINUTES};
pub use shared::entity::{Entity, InvalidIDError, ID};
