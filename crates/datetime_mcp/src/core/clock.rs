use std::fmt::Debug;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Source of the ambient state every operation reads: the current instant
/// and the host's local timezone.
pub trait Clock: Send + Sync + Debug {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;

    /// Timezone used when a caller does not name one
    fn local_timezone(&self) -> Tz;
}

/// Clock backed by the system time and the detected host timezone
#[derive(Debug, Clone)]
pub struct SystemClock {
    local_timezone: Tz,
}

impl SystemClock {
    /// Detect the host timezone, falling back to UTC
    pub fn new() -> Self {
        Self {
            local_timezone: detect_local_timezone(),
        }
    }

    /// Use an explicit local timezone instead of detecting one
    pub fn with_local_timezone(local_timezone: Tz) -> Self {
        Self { local_timezone }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_timezone(&self) -> Tz {
        self.local_timezone
    }
}

/// Clock frozen at a single instant, for reproducible results
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    local_timezone: Tz,
}

#[cfg(test)]
impl FixedClock {
    pub fn new(instant: DateTime<Utc>, local_timezone: Tz) -> Self {
        Self {
            instant,
            local_timezone,
        }
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn local_timezone(&self) -> Tz {
        self.local_timezone
    }
}

fn detect_local_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(tz_name) => match tz_name.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Could not parse timezone '{}', defaulting to UTC", tz_name);
                chrono_tz::UTC
            }
        },
        Err(_) => {
            tracing::warn!("Could not detect system timezone, defaulting to UTC");
            chrono_tz::UTC
        }
    }
}
