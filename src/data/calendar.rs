use chrono::{DateTime, Datelike, NaiveDate, Utc};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 1-based day of the UTC year: 1 on January 1, 366 on December 31 of a leap year.
pub fn day_of_year_utc(now: DateTime<Utc>) -> u32 {
    day_of_year(now.date_naive())
}

/// 1-based day of year for a calendar date.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

/// Current UTC calendar date.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Map a day of year onto a list of `length` segments, wrapping when the year
/// and the book disagree in length. `length` must be at least 1.
pub fn select_index(day: i64, length: usize) -> usize {
    debug_assert!(length >= 1, "select_index on an empty book");
    (day - 1).rem_euclid(length as i64) as usize
}

/// English long month name ("January") of the date.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTH_NAMES[date.month0() as usize]
}

/// How far through the book `day` is, as a percentage of `total`.
pub fn progress_percentage(day: u32, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(day) / total as f64 * 100.0
}
