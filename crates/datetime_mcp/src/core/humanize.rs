//! Natural-language distance between two instants ("3 hours ago", "in 2 days").

use chrono::{DateTime, Datelike, Months, NaiveDateTime, TimeZone};

#[derive(Debug, Clone, Copy)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy)]
enum Phrase {
    FewSeconds,
    Minute,
    Minutes,
    Hour,
    Hours,
    Day,
    Days,
    Month,
    Months,
    Year,
    Years,
}

impl Phrase {
    fn render(self, count: u64) -> String {
        match self {
            Phrase::FewSeconds => "a few seconds".to_string(),
            Phrase::Minute => "a minute".to_string(),
            Phrase::Minutes => format!("{} minutes", count),
            Phrase::Hour => "an hour".to_string(),
            Phrase::Hours => format!("{} hours", count),
            Phrase::Day => "a day".to_string(),
            Phrase::Days => format!("{} days", count),
            Phrase::Month => "a month".to_string(),
            Phrase::Months => format!("{} months", count),
            Phrase::Year => "a year".to_string(),
            Phrase::Years => format!("{} years", count),
        }
    }
}

/// A threshold either measures the distance in a new unit or reuses the
/// previous measurement, and applies while the rounded value stays within
/// `limit`.
struct Threshold {
    phrase: Phrase,
    limit: Option<u64>,
    unit: Option<Unit>,
}

#[rustfmt::skip]
const THRESHOLDS: &[Threshold] = &[
    Threshold { phrase: Phrase::FewSeconds, limit: Some(44), unit: Some(Unit::Second) },
    Threshold { phrase: Phrase::Minute, limit: Some(89), unit: None },
    Threshold { phrase: Phrase::Minutes, limit: Some(44), unit: Some(Unit::Minute) },
    Threshold { phrase: Phrase::Hour, limit: Some(89), unit: None },
    Threshold { phrase: Phrase::Hours, limit: Some(21), unit: Some(Unit::Hour) },
    Threshold { phrase: Phrase::Day, limit: Some(35), unit: None },
    Threshold { phrase: Phrase::Days, limit: Some(25), unit: Some(Unit::Day) },
    Threshold { phrase: Phrase::Month, limit: Some(45), unit: None },
    Threshold { phrase: Phrase::Months, limit: Some(10), unit: Some(Unit::Month) },
    Threshold { phrase: Phrase::Year, limit: Some(17), unit: None },
    Threshold { phrase: Phrase::Years, limit: None, unit: Some(Unit::Year) },
];

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Signed distance `then - now`, measured in each unit
struct Distance {
    millis: f64,
    wall_clock_millis: f64,
    months: f64,
}

impl Distance {
    fn between<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> Self {
        let (then_local, now_local) = (then.naive_local(), now.naive_local());
        let wall_clock_millis = (then_local - now_local).num_milliseconds() as f64;

        Self {
            millis: (then.clone() - now.clone()).num_milliseconds() as f64,
            wall_clock_millis,
            months: month_distance(then_local, now_local)
                .unwrap_or(wall_clock_millis / MS_PER_DAY / 30.436875),
        }
    }

    fn measure(&self, unit: Unit) -> f64 {
        match unit {
            Unit::Second => self.millis / MS_PER_SECOND,
            Unit::Minute => self.millis / MS_PER_MINUTE,
            Unit::Hour => self.millis / MS_PER_HOUR,
            // Days follow the wall clock so DST days still count as one
            Unit::Day => self.wall_clock_millis / MS_PER_DAY,
            Unit::Month => self.months,
            Unit::Year => self.months / 12.0,
        }
    }
}

/// Describe `then` relative to `now`, e.g. `"3 hours ago"` or `"in 2 days"`
pub fn relative_phrase<Tz: TimeZone>(then: &DateTime<Tz>, now: &DateTime<Tz>) -> String {
    let distance = Distance::between(then, now);

    let mut value = 0.0;
    let mut text = String::new();
    for (i, threshold) in THRESHOLDS.iter().enumerate() {
        if let Some(unit) = threshold.unit {
            value = distance.measure(unit);
        }
        let count = value.abs().round() as u64;
        if threshold.limit.is_none_or(|limit| count <= limit) {
            // A counted unit that rounds to one reads better as its singular form
            let phrase = if count <= 1 && i > 0 {
                THRESHOLDS[i - 1].phrase
            } else {
                threshold.phrase
            };
            text = phrase.render(count);
            break;
        }
    }

    if value > 0.0 {
        format!("in {}", text)
    } else {
        format!("{} ago", text)
    }
}

/// Calendar-aware months from `now` to `then`, with a fractional part
/// measured against the length of the month the remainder falls in.
///
/// Whole months are counted from `then`, unless `then` falls on an earlier
/// day of the month than `now`; in that case they are counted from `now`.
fn month_distance(then: NaiveDateTime, now: NaiveDateTime) -> Option<f64> {
    if then.day() < now.day() {
        return month_distance(now, then).map(|m| -m);
    }

    let whole = (now.year() - then.year()) * 12 + (now.month() as i32 - then.month() as i32);
    let anchor = shift_months(then, whole)?;
    let behind = now < anchor;
    let next_anchor = shift_months(then, whole + if behind { -1 } else { 1 })?;

    let step = if behind {
        anchor - next_anchor
    } else {
        next_anchor - anchor
    };
    let remainder = (now - anchor).num_milliseconds() as f64;

    Some(-(whole as f64 + remainder / step.num_milliseconds() as f64))
}

fn shift_months(dt: NaiveDateTime, months: i32) -> Option<NaiveDateTime> {
    if months >= 0 {
        dt.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        dt.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}
