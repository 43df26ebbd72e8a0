/// Pure date utility functions (Discord-agnostic)
use chrono::{Days, NaiveDate};

/// Get month name from month number (1-12)
pub fn get_month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Format a date as "MonthName Day" (e.g., "March 15")
pub fn format_month_day(month: u32, day: u32) -> String {
    format!("{} {}", get_month_name(month), day)
}

/// Check if a date matches month and day (ignoring year)
pub fn matches_birthday(month: u32, day: u32, target_month: u32, target_day: u32) -> bool {
    month == target_month && day == target_day
}

/// Calendar date of a (month, day) pair in a given year.
///
/// Days past the end of the month overflow into the next month, so
/// February 29 in a non-leap year lands on March 1 and April 31 on May 1.
/// Returns `None` for a month outside 1..=12 or a day of 0.
pub fn occurrence_in_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if day == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}
