/// Ranking of upcoming birthdays relative to a reference time
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

use crate::models::BirthdayRecord;
use crate::utils::datetime::{format_month_day, occurrence_in_year};

/// Nearest upcoming birthday plus everyone sharing the same day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextBirthday {
    pub name: String,
    pub month: u32,
    pub day: u32,
    pub days_until: i64,
    /// Names of other records with the same `days_until`, in store order
    pub ties: Vec<String>,
}

/// Next occurrence of (month, day) on or after `today`
fn next_occurrence(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let this_year = occurrence_in_year(today.year(), month, day)?;
    if this_year < today {
        occurrence_in_year(today.year() + 1, month, day)
    } else {
        Some(this_year)
    }
}

/// Find the chronologically nearest birthday(s).
///
/// Dates are compared on the calendar, so a birthday today is 0 days away
/// whatever the time of day. Records whose month cannot form a date are
/// skipped.
pub fn find_next<Tz: TimeZone>(records: &[BirthdayRecord], now: &DateTime<Tz>) -> Option<NextBirthday> {
    let today = now.date_naive();

    let mut upcoming: Vec<(&BirthdayRecord, i64)> = records
        .iter()
        .filter_map(|record| {
            let occurrence = next_occurrence(today, record.month, record.day)?;
            Some((record, (occurrence - today).num_days()))
        })
        .collect();

    // Stable: equal distances keep store order
    upcoming.sort_by_key(|(_, days_until)| *days_until);

    let (&(primary, days_until), rest) = upcoming.split_first()?;
    let ties = rest
        .iter()
        .take_while(|(_, days)| *days == days_until)
        .map(|(record, _)| record.name.clone())
        .collect();

    Some(NextBirthday {
        name: primary.name.clone(),
        month: primary.month,
        day: primary.day,
        days_until,
        ties,
    })
}

/// Format the result for a `next` query
pub fn render_next_birthday(next: &NextBirthday) -> String {
    let suffix = match next.days_until {
        0 => "(Today! 🎉)".to_string(),
        1 => "(Tomorrow!)".to_string(),
        n => format!("(in {} days)", n),
    };

    let mut result = format!(
        "Next birthday: {} on {} {}",
        next.name,
        format_month_day(next.month, next.day),
        suffix
    );
    for name in &next.ties {
        result.push_str(&format!("\nAlso: {}", name));
    }
    result
}
