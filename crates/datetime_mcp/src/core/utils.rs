use std::fmt::Display;

/// Layout used by `convert_time` and the status resource
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rendered in place of a date that could not be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Rendered in place of a number derived from an unparseable date
pub const NOT_A_NUMBER: &str = "NaN";

/// Available resource URIs for the DateTime MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &["time://status", "time://help", "time://formats"];

/// Render a computed number, or `NaN` when the input date was invalid
///
/// # Arguments
///
/// * `value` - The computed value, `None` when the source date was invalid
///
/// # Returns
///
/// The number as text, or the `NaN` sentinel
pub fn display_or_nan<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_A_NUMBER.to_string(),
    }
}

/// An optional argument, with blank strings treated as omitted
pub fn non_blank(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|s| !s.is_empty())
}

/// Whole hours between two UTC offsets, truncated toward zero
///
/// # Arguments
///
/// * `source_offset_secs` - Source zone offset from UTC in seconds
/// * `target_offset_secs` - Target zone offset from UTC in seconds
pub fn offset_difference_hours(source_offset_secs: i32, target_offset_secs: i32) -> i64 {
    (i64::from(target_offset_secs) - i64::from(source_offset_secs)) / 3600
}

#[cfg(test)]
mod tests {
    use super::{display_or_nan, non_blank, offset_difference_hours};

    #[test]
    fn test_display_or_nan() {
        assert_eq!(display_or_nan(Some(31)), "31");
        assert_eq!(display_or_nan(Some(-8i64)), "-8");
        assert_eq!(display_or_nan::<u32>(None), "NaN");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" 2025-03-23 ")), Some("2025-03-23"));
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some(" \t ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_offset_difference_truncates() {
        // Shanghai (+8) to London (+0)
        assert_eq!(offset_difference_hours(8 * 3600, 0), -8);
        // UTC to Kolkata (+5:30) truncates to 5
        assert_eq!(offset_difference_hours(0, 5 * 3600 + 1800), 5);
        // Kolkata to UTC truncates toward zero, not down
        assert_eq!(offset_difference_hours(5 * 3600 + 1800, 0), -5);
        // Nepal (+5:45) to Chatham (+12:45)
        assert_eq!(offset_difference_hours(20700, 45900), 7);
    }
}
