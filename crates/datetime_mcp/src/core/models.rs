use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::format::FormatPattern;

/// Helper function to deserialize and trim strings
fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Same as [`deserialize_trimmed_string`] for optional fields; a blank
/// string counts as omitted
fn deserialize_trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Current instant rendered in UTC and in a named timezone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CurrentTime {
    /// The instant rendered in UTC
    pub utc: String,
    /// The instant rendered in `timezone`
    pub local: String,
    /// Timezone used for `local`, as requested or as detected
    pub timezone: String,
}

/// The same instant seen from two timezones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeConversion {
    /// Instant in the source timezone, `YYYY-MM-DD HH:mm:ss`
    pub source_time: String,
    /// Instant in the target timezone, `YYYY-MM-DD HH:mm:ss`
    pub target_time: String,
    /// Whole hours the target is ahead of the source; `None` for an invalid time
    pub time_diff: Option<i64>,
}

/// Week numbers of a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekOfYear {
    /// Sunday-start week containing January 1 as week 1
    pub week: Option<u32>,
    /// ISO-8601 week number
    pub iso_week: Option<u32>,
}

/// Request for the current time
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CurrentTimeRequest {
    /// The format of the time
    #[serde(default)]
    pub format: FormatPattern,
    /// The timezone of the time, IANA timezone name, e.g. Asia/Shanghai
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub timezone: Option<String>,
}

/// Request for the distance between a time and now
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RelativeTimeRequest {
    /// The time to get the relative time from now. Format: YYYY-MM-DD HH:mm:ss
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub time: String,
}

/// Request for the number of days in a month
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DaysInMonthRequest {
    /// The date to get the days in month. Format: YYYY-MM-DD
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub date: Option<String>,
}

/// Request for an epoch timestamp
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetTimestampRequest {
    /// The time to get the timestamp, parsed as UTC. Format: YYYY-MM-DD HH:mm:ss.SSS
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub time: Option<String>,
}

/// Request to convert a time between timezones
#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertTimeRequest {
    /// The source timezone. IANA timezone name, e.g. Asia/Shanghai
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub source_timezone: String,
    /// The target timezone. IANA timezone name, e.g. Europe/London
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub target_timezone: String,
    /// Date and time in 24-hour format, read in the source timezone. e.g. 2025-03-23 12:30:00
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub time: Option<String>,
}

/// Request for the week numbers of a date
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct WeekOfYearRequest {
    /// The date to get the week and isoWeek of the year. e.g. 2025-03-23
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub date: Option<String>,
}
