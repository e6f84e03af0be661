use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Offset};
use chrono_tz::Tz;

use crate::core::{
    calendar,
    clock::Clock,
    format::FormatPattern,
    humanize,
    models::{CurrentTime, TimeConversion, WeekOfYear},
    parse::CivilDateTime,
    utils::{self, DATETIME_FORMAT, INVALID_DATE, non_blank},
};

/// The six date/time operations behind the MCP tools.
///
/// Every operation is total: strings that do not parse as dates produce
/// `Invalid Date` text or `None` numbers instead of errors. Blank optional
/// arguments are treated as omitted.
#[derive(Debug, Clone)]
pub struct TimeServer {
    clock: Arc<dyn Clock>,
}

impl TimeServer {
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn local_timezone(&self) -> Tz {
        self.clock.local_timezone()
    }

    /// Resolve an IANA name, falling back to UTC for unknown names
    pub(crate) fn resolve_timezone(&self, timezone_name: &str) -> Tz {
        Tz::from_str(timezone_name).unwrap_or_else(|_| {
            tracing::warn!("Unknown timezone '{}', falling back to UTC", timezone_name);
            chrono_tz::UTC
        })
    }

    /// The current instant in the local timezone
    pub fn now_local(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.local_timezone())
    }

    /// Parse `input` as a wall-clock reading in the local timezone
    fn parse_local(&self, input: &str) -> Option<DateTime<Tz>> {
        CivilDateTime::parse(input).map(|civil| civil.in_zone(&self.local_timezone()))
    }

    fn local_or_now(&self, input: Option<&str>) -> Option<DateTime<Tz>> {
        match non_blank(input) {
            Some(input) => self.parse_local(input),
            None => Some(self.now_local()),
        }
    }

    pub fn get_current_time(&self, format: FormatPattern, timezone: Option<&str>) -> CurrentTime {
        let now = self.clock.now();
        let (zone, timezone) = match non_blank(timezone) {
            Some(name) => (self.resolve_timezone(name), name.to_string()),
            None => {
                let local = self.local_timezone();
                (local, local.name().to_string())
            }
        };

        CurrentTime {
            utc: format.render(&now),
            local: format.render(&now.with_timezone(&zone)),
            timezone,
        }
    }

    pub fn relative_time(&self, time: &str) -> String {
        match self.parse_local(time) {
            Some(then) => humanize::relative_phrase(&then, &self.now_local()),
            None => INVALID_DATE.to_string(),
        }
    }

    pub fn days_in_month(&self, date: Option<&str>) -> Option<u32> {
        self.local_or_now(date)
            .map(|dt| calendar::days_in_month(dt.date_naive()))
    }

    /// Epoch milliseconds; an explicit `time` is always read as UTC
    pub fn get_timestamp(&self, time: Option<&str>) -> Option<i64> {
        match non_blank(time) {
            Some(time) => CivilDateTime::parse(time).map(|civil| civil.as_utc().timestamp_millis()),
            None => Some(self.clock.now().timestamp_millis()),
        }
    }

    pub fn convert_time(
        &self,
        source_timezone: &str,
        target_timezone: &str,
        time: Option<&str>,
    ) -> TimeConversion {
        let source_tz = self.resolve_timezone(source_timezone);
        let target_tz = self.resolve_timezone(target_timezone);

        let source_time = match non_blank(time) {
            Some(time) => CivilDateTime::parse(time).map(|civil| civil.in_zone(&source_tz)),
            None => Some(self.clock.now().with_timezone(&source_tz)),
        };

        match source_time {
            Some(source_time) => {
                let target_time = source_time.with_timezone(&target_tz);
                let time_diff = utils::offset_difference_hours(
                    source_time.offset().fix().local_minus_utc(),
                    target_time.offset().fix().local_minus_utc(),
                );

                TimeConversion {
                    source_time: source_time.format(DATETIME_FORMAT).to_string(),
                    target_time: target_time.format(DATETIME_FORMAT).to_string(),
                    time_diff: Some(time_diff),
                }
            }
            None => TimeConversion {
                source_time: INVALID_DATE.to_string(),
                target_time: INVALID_DATE.to_string(),
                time_diff: None,
            },
        }
    }

    pub fn get_week_year(&self, date: Option<&str>) -> WeekOfYear {
        match self.local_or_now(date) {
            Some(dt) => WeekOfYear {
                week: Some(calendar::week_of_year(dt.date_naive())),
                iso_week: Some(calendar::iso_week(dt.date_naive())),
            },
            None => WeekOfYear {
                week: None,
                iso_week: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, TimeZone, Utc};

    use super::*;
    use crate::core::clock::FixedClock;

    fn server_at(instant: DateTime<Utc>, local: Tz) -> TimeServer {
        TimeServer::with_clock(Arc::new(FixedClock::new(instant, local)))
    }

    fn fixed_server() -> TimeServer {
        let instant = Utc.with_ymd_and_hms(2025, 3, 23, 12, 30, 0).unwrap();
        server_at(instant, chrono_tz::Asia::Shanghai)
    }

    fn offset_minutes(tz: Tz, instant: DateTime<Utc>) -> i64 {
        i64::from(instant.with_timezone(&tz).offset().fix().local_minus_utc()) / 60
    }

    #[test]
    fn test_current_time_renders_one_instant_in_two_zones() {
        let instant = Utc.with_ymd_and_hms(2025, 7, 1, 9, 15, 30).unwrap();
        let server = server_at(instant, chrono_tz::UTC);

        for name in ["America/New_York", "Asia/Kolkata", "Australia/Sydney", "UTC"] {
            let tz: Tz = name.parse().unwrap();

            for pattern in FormatPattern::ALL {
                let result = server.get_current_time(pattern, Some(name));
                assert_eq!(result.utc, pattern.render(&instant), "{pattern} in {name}");
                assert_eq!(
                    result.local,
                    pattern.render(&instant.with_timezone(&tz)),
                    "{pattern} in {name}"
                );
                assert_eq!(result.timezone, name);
            }

            let result = server.get_current_time(FormatPattern::DateTime, Some(name));
            let utc = NaiveDateTime::parse_from_str(&result.utc, DATETIME_FORMAT).unwrap();
            let local = NaiveDateTime::parse_from_str(&result.local, DATETIME_FORMAT).unwrap();
            assert_eq!((local - utc).num_minutes(), offset_minutes(tz, instant));
        }

        // Sydney is ten hours ahead in July
        let result = server.get_current_time(FormatPattern::HourMinute12, Some("Australia/Sydney"));
        assert_eq!(result.utc, "9:15 AM");
        assert_eq!(result.local, "7:15 PM");
        let result = server.get_current_time(FormatPattern::UsDate, Some("Australia/Sydney"));
        assert_eq!(result.local, "07/01/2025");
    }

    #[test]
    fn test_current_time_defaults_to_local_zone() {
        let result = fixed_server().get_current_time(FormatPattern::DateTime, None);
        assert_eq!(result.timezone, "Asia/Shanghai");
        assert_eq!(result.utc, "2025-03-23 12:30:00");
        assert_eq!(result.local, "2025-03-23 20:30:00");
    }

    #[test]
    fn test_current_time_unknown_zone_falls_back_to_utc() {
        let result = fixed_server().get_current_time(FormatPattern::Date, Some("Invalid/Zone"));
        assert_eq!(result.timezone, "Invalid/Zone");
        assert_eq!(result.local, result.utc);
    }

    #[test]
    fn test_relative_time() {
        let server = fixed_server();
        // Local zone is Shanghai, so 17:30 local is three hours before 20:30 local
        assert_eq!(server.relative_time("2025-03-23 17:30:00"), "3 hours ago");
        assert_eq!(server.relative_time("2025-03-25 20:30:00"), "in 2 days");
        assert_eq!(server.relative_time("yesterday"), "Invalid Date");
    }

    #[test]
    fn test_days_in_month() {
        let server = fixed_server();
        assert_eq!(server.days_in_month(Some("2024-02-15")), Some(29));
        assert_eq!(server.days_in_month(Some("2023-02-15")), Some(28));
        assert_eq!(server.days_in_month(Some("2024-04-01")), Some(30));
        assert_eq!(server.days_in_month(Some("2024-01-01")), Some(31));
        assert_eq!(server.days_in_month(None), Some(31));
        assert_eq!(server.days_in_month(Some("garbage")), None);
    }

    #[test]
    fn test_get_timestamp_parses_as_utc() {
        let server = fixed_server();
        assert_eq!(
            server.get_timestamp(Some("2025-01-01 00:00:00")),
            Some(1735689600000)
        );
        assert_eq!(
            server.get_timestamp(Some("2025-01-01 00:00:00.250")),
            Some(1735689600250)
        );
        assert_eq!(
            server.get_timestamp(None),
            Some(Utc.with_ymd_and_hms(2025, 3, 23, 12, 30, 0).unwrap().timestamp_millis())
        );
        assert_eq!(server.get_timestamp(Some("not a time")), None);
    }

    #[test]
    fn test_convert_time_shanghai_to_london() {
        let server = fixed_server();
        let result = server.convert_time("Asia/Shanghai", "Europe/London", Some("2025-03-23 12:30:00"));

        // London is still on GMT on 2025-03-23
        assert_eq!(result.source_time, "2025-03-23 12:30:00");
        assert_eq!(result.target_time, "2025-03-23 04:30:00");
        assert_eq!(result.time_diff, Some(-8));
    }

    #[test]
    fn test_convert_time_diff_tracks_dst() {
        let server = fixed_server();
        let result = server.convert_time("Asia/Shanghai", "Europe/London", Some("2025-07-01 12:00:00"));
        assert_eq!(result.target_time, "2025-07-01 05:00:00");
        assert_eq!(result.time_diff, Some(-7));
    }

    #[test]
    fn test_convert_time_truncates_fractional_offsets() {
        let server = fixed_server();
        let result = server.convert_time("UTC", "Asia/Kolkata", Some("2025-01-01 00:00:00"));
        assert_eq!(result.target_time, "2025-01-01 05:30:00");
        assert_eq!(result.time_diff, Some(5));

        let result = server.convert_time("Asia/Kolkata", "UTC", Some("2025-01-01 05:30:00"));
        assert_eq!(result.target_time, "2025-01-01 00:00:00");
        assert_eq!(result.time_diff, Some(-5));
    }

    #[test]
    fn test_convert_time_without_time_uses_now() {
        let result = fixed_server().convert_time("UTC", "America/New_York", None);
        assert_eq!(result.source_time, "2025-03-23 12:30:00");
        assert_eq!(result.target_time, "2025-03-23 08:30:00");
        assert_eq!(result.time_diff, Some(-4));
    }

    #[test]
    fn test_convert_time_invalid_time() {
        let result = fixed_server().convert_time("UTC", "Asia/Tokyo", Some("25:99"));
        assert_eq!(result.source_time, "Invalid Date");
        assert_eq!(result.target_time, "Invalid Date");
        assert_eq!(result.time_diff, None);
    }

    #[test]
    fn test_get_week_year() {
        let server = fixed_server();
        assert_eq!(
            server.get_week_year(Some("2025-01-01")),
            WeekOfYear {
                week: Some(1),
                iso_week: Some(1),
            }
        );
        assert_eq!(
            server.get_week_year(None),
            WeekOfYear {
                week: Some(13),
                iso_week: Some(12),
            }
        );
        assert_eq!(
            server.get_week_year(Some("nope")),
            WeekOfYear {
                week: None,
                iso_week: None,
            }
        );
    }

    #[test]
    fn test_blank_arguments_count_as_omitted() {
        let server = fixed_server();

        for blank in ["", "   "] {
            assert_eq!(server.days_in_month(Some(blank)), Some(31));
            assert_eq!(server.get_timestamp(Some(blank)), Some(1742733000000));
            assert_eq!(
                server.get_week_year(Some(blank)),
                WeekOfYear {
                    week: Some(13),
                    iso_week: Some(12),
                }
            );

            let result = server.convert_time("Asia/Shanghai", "Europe/London", Some(blank));
            assert_eq!(result.source_time, "2025-03-23 20:30:00");
            assert_eq!(result.target_time, "2025-03-23 12:30:00");
            assert_eq!(result.time_diff, Some(-8));

            let result = server.get_current_time(FormatPattern::DateTime, Some(blank));
            assert_eq!(result.timezone, "Asia/Shanghai");
        }
    }

    #[test]
    fn test_explicit_arguments_are_idempotent() {
        let a = fixed_server();
        let b = server_at(Utc::now(), chrono_tz::Asia::Shanghai);

        assert_eq!(
            a.get_timestamp(Some("2024-06-30 23:59:59")),
            b.get_timestamp(Some("2024-06-30 23:59:59"))
        );
        assert_eq!(
            a.convert_time("Europe/Paris", "Asia/Tokyo", Some("2024-06-30 23:59:59")),
            b.convert_time("Europe/Paris", "Asia/Tokyo", Some("2024-06-30 23:59:59"))
        );
        assert_eq!(a.days_in_month(Some("2024-06-30")), b.days_in_month(Some("2024-06-30")));
        assert_eq!(a.get_week_year(Some("2024-06-30")), b.get_week_year(Some("2024-06-30")));
    }

    #[test]
    fn test_format_then_parse_local_round_trip() {
        let server = fixed_server();
        let now = server.now_local();
        let rendered = FormatPattern::DateTime.render(&now);

        let reparsed = server.parse_local(&rendered).unwrap();
        assert_eq!(reparsed.timestamp(), now.timestamp());
    }
}
