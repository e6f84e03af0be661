//! Parsing of caller-supplied date/time strings.
//!
//! The primary grammar is a table of year-first chrono layouts
//! (`2025-03-23 12:30:45.250`, `2025/3/23T12:30`, `20250323`, `2025-03`,
//! `2025`). Missing month and day default to 1, a missing time to midnight.
//! Such readings carry no offset and are placed on a timeline by the caller,
//! either in a timezone ([`CivilDateTime::in_zone`]) or as UTC
//! ([`CivilDateTime::as_utc`]). Anything else is tried as RFC 3339 and
//! RFC 2822 and keeps its own offset.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;

/// A parsed date/time string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CivilDateTime {
    /// Wall-clock reading without an offset
    Naive(NaiveDateTime),
    /// Absolute instant carrying the offset it was written with
    Offset(DateTime<FixedOffset>),
}

impl CivilDateTime {
    /// Parse `input`, returning `None` when it is not a valid date
    pub fn parse(input: &str) -> Option<Self> {
        if let Some(naive) = parse_year_first(input) {
            return Some(CivilDateTime::Naive(naive));
        }

        DateTime::parse_from_rfc3339(input)
            .or_else(|_| DateTime::parse_from_rfc2822(input))
            .ok()
            .map(CivilDateTime::Offset)
    }

    /// Place the reading in `tz`: naive readings are wall-clock time there
    pub fn in_zone(&self, tz: &Tz) -> DateTime<Tz> {
        match self {
            CivilDateTime::Naive(naive) => localize(tz, *naive),
            CivilDateTime::Offset(dt) => dt.with_timezone(tz),
        }
    }

    /// Place the reading on the timeline treating naive readings as UTC
    pub fn as_utc(&self) -> DateTime<Utc> {
        match self {
            CivilDateTime::Naive(naive) => Utc.from_utc_datetime(naive),
            CivilDateTime::Offset(dt) => dt.with_timezone(&Utc),
        }
    }
}

/// Resolve a wall-clock reading in `tz`.
///
/// Ambiguous readings (clocks turned back) take the earlier instant. Readings
/// inside a gap (clocks turned forward) are read with the offset in force
/// before the transition, which lands them after the gap.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(naive - TimeDelta::days(1)))
                .fix();
            tz.from_utc_datetime(&(naive - TimeDelta::seconds(i64::from(before.local_minus_utc()))))
        }
    }
}

/// Year-first layouts carrying a time of day, tried in order
const PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M",
    "%Y%m%d %H:%M:%S%.f",
    "%Y%m%dT%H:%M:%S%.f",
];

/// Date-only layouts, read as midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Layouts missing the day or month, completed with the suffix before parsing
const PARTIAL_DATE_FORMATS: &[(&str, &str)] = &[
    ("-01", "%Y-%m-%d"),
    ("/01", "%Y/%m/%d"),
    ("-01-01", "%Y-%m-%d"),
];

fn parse_year_first(input: &str) -> Option<NaiveDateTime> {
    if let Some(naive) = PARSE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
    {
        return Some(naive);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .or_else(|| {
            PARTIAL_DATE_FORMATS.iter().find_map(|(suffix, fmt)| {
                NaiveDate::parse_from_str(&format!("{input}{suffix}"), fmt).ok()
            })
        })
        .map(|date| date.and_time(NaiveTime::MIN))
}
