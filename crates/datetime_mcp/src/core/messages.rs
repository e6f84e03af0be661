//! Response text for each tool, kept apart from the computations.

use crate::core::{
    models::{CurrentTime, TimeConversion, WeekOfYear},
    utils::{display_or_nan, non_blank},
};

pub fn current_time(result: &CurrentTime) -> String {
    format!(
        "Current UTC time is {}, and the time in {} is {}.",
        result.utc, result.timezone, result.local
    )
}

/// The phrase is returned as-is
pub fn relative_time(phrase: String) -> String {
    phrase
}

pub fn days_in_month(days: Option<u32>) -> String {
    format!("The number of days in month is {}.", display_or_nan(days))
}

/// `time` is the caller's argument, echoed when present and not blank
pub fn timestamp(time: Option<&str>, millis: Option<i64>) -> String {
    match non_blank(time) {
        Some(time) => format!(
            "The timestamp of {} (parsed as UTC) is {} ms.",
            time,
            display_or_nan(millis)
        ),
        None => format!("The current timestamp is {} ms.", display_or_nan(millis)),
    }
}

pub fn convert_time(source_timezone: &str, target_timezone: &str, result: &TimeConversion) -> String {
    format!(
        "Current time in {} is {}, and the time in {} is {}. The time difference is {} hours.",
        source_timezone,
        result.source_time,
        target_timezone,
        result.target_time,
        display_or_nan(result.time_diff)
    )
}

pub fn week_year(result: &WeekOfYear) -> String {
    format!(
        "The week of the year is {}, and the isoWeek of the year is {}.",
        display_or_nan(result.week),
        display_or_nan(result.iso_week)
    )
}
