use std::fmt;

use chrono::{DateTime, TimeZone};
use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// Output layouts accepted by `current_time`.
///
/// The serialized names are the token strings callers send; anything
/// outside this list is rejected while the arguments are deserialized.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
pub enum FormatPattern {
    /// 12-hour clock, e.g. `3:07 PM`
    #[serde(rename = "h:mm A")]
    HourMinute12,
    /// 12-hour clock with seconds, e.g. `3:07:09 PM`
    #[serde(rename = "h:mm:ss A")]
    HourMinuteSecond12,
    /// e.g. `2025-03-23 15:07:09`
    #[default]
    #[serde(rename = "YYYY-MM-DD HH:mm:ss")]
    DateTime,
    /// e.g. `2025-03-23`
    #[serde(rename = "YYYY-MM-DD")]
    Date,
    /// e.g. `2025-03`
    #[serde(rename = "YYYY-MM")]
    YearMonth,
    /// e.g. `03/23/2025`
    #[serde(rename = "MM/DD/YYYY")]
    UsDate,
    /// e.g. `03/23/25`
    #[serde(rename = "MM/DD/YY")]
    UsShortDate,
    /// e.g. `2025/03/23`
    #[serde(rename = "YYYY/MM/DD")]
    SlashDate,
    /// e.g. `2025/03`
    #[serde(rename = "YYYY/MM")]
    SlashYearMonth,
}

impl FormatPattern {
    pub const ALL: [FormatPattern; 9] = [
        FormatPattern::HourMinute12,
        FormatPattern::HourMinuteSecond12,
        FormatPattern::DateTime,
        FormatPattern::Date,
        FormatPattern::YearMonth,
        FormatPattern::UsDate,
        FormatPattern::UsShortDate,
        FormatPattern::SlashDate,
        FormatPattern::SlashYearMonth,
    ];

    /// The token string callers use for this pattern
    pub fn as_str(self) -> &'static str {
        match self {
            FormatPattern::HourMinute12 => "h:mm A",
            FormatPattern::HourMinuteSecond12 => "h:mm:ss A",
            FormatPattern::DateTime => "YYYY-MM-DD HH:mm:ss",
            FormatPattern::Date => "YYYY-MM-DD",
            FormatPattern::YearMonth => "YYYY-MM",
            FormatPattern::UsDate => "MM/DD/YYYY",
            FormatPattern::UsShortDate => "MM/DD/YY",
            FormatPattern::SlashDate => "YYYY/MM/DD",
            FormatPattern::SlashYearMonth => "YYYY/MM",
        }
    }

    /// Equivalent chrono strftime layout
    pub fn strftime(self) -> &'static str {
        match self {
            FormatPattern::HourMinute12 => "%-I:%M %p",
            FormatPattern::HourMinuteSecond12 => "%-I:%M:%S %p",
            FormatPattern::DateTime => "%Y-%m-%d %H:%M:%S",
            FormatPattern::Date => "%Y-%m-%d",
            FormatPattern::YearMonth => "%Y-%m",
            FormatPattern::UsDate => "%m/%d/%Y",
            FormatPattern::UsShortDate => "%m/%d/%y",
            FormatPattern::SlashDate => "%Y/%m/%d",
            FormatPattern::SlashYearMonth => "%Y/%m",
        }
    }

    /// Render a zoned datetime in this layout
    pub fn render<Tz>(self, dt: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        dt.format(self.strftime()).to_string()
    }
}

impl fmt::Display for FormatPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_render_every_pattern() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 5, 15, 7, 9).unwrap();
        let expected = [
            "3:07 PM",
            "3:07:09 PM",
            "2025-03-05 15:07:09",
            "2025-03-05",
            "2025-03",
            "03/05/2025",
            "03/05/25",
            "2025/03/05",
            "2025/03",
        ];

        for (pattern, want) in FormatPattern::ALL.iter().zip(expected) {
            assert_eq!(pattern.render(&dt), want, "pattern {}", pattern);
        }
    }

    #[test]
    fn test_midnight_renders_as_twelve_am() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 1, 0, 5, 0).unwrap();
        assert_eq!(FormatPattern::HourMinute12.render(&dt), "12:05 AM");
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(FormatPattern::default(), FormatPattern::DateTime);
    }

    #[test]
    fn test_deserialize_tokens() {
        for pattern in FormatPattern::ALL {
            let json = serde_json::to_string(pattern.as_str()).unwrap();
            let parsed: FormatPattern = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, pattern);
        }

        assert!(serde_json::from_str::<FormatPattern>(r#""DD.MM.YYYY""#).is_err());
    }
}
