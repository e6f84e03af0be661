use chrono::{Datelike, NaiveDate};

/// Number of days in the month containing `date` (28 to 31)
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match (first, next_first) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        // Only reachable at the very end of chrono's supported range
        _ => 31,
    }
}

/// Week of the year with weeks starting on Sunday.
///
/// Week 1 is the week containing January 1, so it may begin in December.
/// Days at the end of December whose week already contains the next
/// January 1 count as week 1 of the following year.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let end_of_week = date + chrono::Days::new(u64::from(6 - sunday_index(date)));
    if end_of_week.year() > date.year() {
        return 1;
    }

    let Some(jan_first) = NaiveDate::from_ymd_opt(date.year(), 1, 1) else {
        return 1;
    };
    let first_week_start = jan_first - chrono::Days::new(u64::from(sunday_index(jan_first)));

    ((date - first_week_start).num_days() / 7) as u32 + 1
}

/// ISO-8601 week number: Monday start, week 1 holds the first Thursday
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

fn sunday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}
