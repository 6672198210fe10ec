use chrono_tz::Tz;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Timezone used to resolve an event's due moment from its calendar
    /// date and wall-clock time. Defaults to UTC when `PETID_TIMEZONE`
    /// is unset; the host app passes the device timezone here.
    pub timezone: Tz,
    /// Seconds between periodic reminder reconciliations. The component
    /// performs no internal retries, so a failed pass is simply redone on
    /// the next tick.
    pub reminder_sync_interval_secs: u64,
    /// When set, the notification reference index is persisted as a JSON
    /// file at this path so bookkeeping survives app restarts.
    pub reference_index_path: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        let timezone = match std::env::var("PETID_TIMEZONE") {
            Ok(raw) => match raw.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given PETID_TIMEZONE: {} is not a valid timezone, falling back to UTC.",
                        raw
                    );
                    Tz::UTC
                }
            },
            Err(_) => Tz::UTC,
        };

        let default_interval_secs: u64 = 60 * 60; // hourly
        let reminder_sync_interval_secs = match std::env::var("REMINDER_SYNC_INTERVAL") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "The given REMINDER_SYNC_INTERVAL: {} is not valid, falling back to the default interval: {} seconds.",
                        raw, default_interval_secs
                    );
                    default_interval_secs
                }
            },
            Err(_) => default_interval_secs,
        };

        let reference_index_path = std::env::var("REFERENCE_INDEX_PATH").ok().map(PathBuf::from);

        Self {
            timezone,
            reminder_sync_interval_secs,
            reference_index_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
