use crate::shared::entity::{Entity, ID};
use chrono::{LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar entry owned by a pet owner, for example a vet appointment
/// or an upcoming vaccination date. Events are read-only for the reminder
/// component; the host app creates and mutates them in the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetEvent {
    pub id: ID,
    pub owner_user_id: ID,
    pub title: String,
    pub date: NaiveDate,
    /// Wall-clock time of the event. Events saved without a time are
    /// treated as due at noon.
    pub time: Option<NaiveTime>,
}

#[derive(Error, Debug)]
pub enum InvalidEventTimeError {
    #[error("Event time: {0} is malformed, expected HH:MM")]
    Malformed(String),
}

impl PetEvent {
    /// Parses the `HH:MM` time strings the document store delivers.
    pub fn parse_time(raw: &str) -> Result<NaiveTime, InvalidEventTimeError> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .map_err(|_| InvalidEventTimeError::Malformed(raw.to_string()))
    }

    /// The absolute moment this event is due in the given timezone, in
    /// millis since the epoch. Ambiguous local times (DST fold) resolve to
    /// the earlier instant; nonexistent local times (DST gap) resolve to
    /// `None` and the event gets no reminders until it is rescheduled.
    pub fn due_moment_millis(&self, tz: &Tz) -> Option<i64> {
        let time = self.time.unwrap_or_else(|| NaiveTime::from_hms(12, 0, 0));
        match tz.from_local_datetime(&self.date.and_time(time)) {
            LocalResult::Single(due) => Some(due.timestamp_millis()),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
            LocalResult::None => None,
        }
    }
}

impl Entity for PetEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;

    fn event(date: NaiveDate, time: Option<NaiveTime>) -> PetEvent {
        PetEvent {
            id: Default::default(),
            owner_user_id: Default::default(),
            title: "Vet appointment".into(),
            date,
            time,
        }
    }

    #[test]
    fn parses_wall_clock_times() {
        assert_eq!(
            PetEvent::parse_time("09:30").unwrap(),
            NaiveTime::from_hms(9, 30, 0)
        );
        assert!(PetEvent::parse_time("9.30").is_err());
        assert!(PetEvent::parse_time("25:00").is_err());
    }

    #[test]
    fn event_without_time_is_due_at_noon() {
        let e = event(NaiveDate::from_ymd(2024, 6, 10), None);
        let expected = Utc.ymd(2024, 6, 10).and_hms(12, 0, 0).timestamp_millis();
        assert_eq!(e.due_moment_millis(&chrono_tz::UTC), Some(expected));
    }

    #[test]
    fn event_with_time_is_due_at_that_time() {
        let e = event(
            NaiveDate::from_ymd(2024, 6, 10),
            Some(NaiveTime::from_hms(9, 0, 0)),
        );
        let expected = Utc.ymd(2024, 6, 10).and_hms(9, 0, 0).timestamp_millis();
        assert_eq!(e.due_moment_millis(&chrono_tz::UTC), Some(expected));
    }

    #[test]
    fn due_moment_respects_timezone() {
        let e = event(
            NaiveDate::from_ymd(2024, 6, 10),
            Some(NaiveTime::from_hms(9, 0, 0)),
        );
        // 09:00 in Oslo is 07:00 UTC during summer time
        let expected = Utc.ymd(2024, 6, 10).and_hms(7, 0, 0).timestamp_millis();
        assert_eq!(e.due_moment_millis(&chrono_tz::Europe::Oslo), Some(expected));
    }

    #[test]
    fn nonexistent_local_time_has_no_due_moment() {
        // 2024-03-10 02:30 does not exist in New York (spring forward)
        let e = event(
            NaiveDate::from_ymd(2024, 3, 10),
            Some(NaiveTime::from_hms(2, 30, 0)),
        );
        assert_eq!(e.due_moment_millis(&chrono_tz::America::New_York), None);
    }
}
