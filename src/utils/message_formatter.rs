/// Pure functions for birthday message formatting (Discord-agnostic)
use crate::constants::{SENTINEL_DAY, SENTINEL_MONTH, SENTINEL_NAME, SENTINEL_TEXT};
use crate::models::BirthdayRecord;
use crate::utils::datetime::{get_month_name, matches_birthday};
use crate::utils::pronouns::{resolve, PronounForm};

/// Fixed message substituted for a reserved name on a given day of the year.
///
/// The rule keys on today's date only; the record's own stored date is not
/// consulted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentinelRule {
    pub name: String,
    pub month: u32,
    pub day: u32,
    pub text: String,
}

impl Default for SentinelRule {
    fn default() -> Self {
        Self {
            name: SENTINEL_NAME.to_string(),
            month: SENTINEL_MONTH,
            day: SENTINEL_DAY,
            text: SENTINEL_TEXT.to_string(),
        }
    }
}

impl SentinelRule {
    /// Whether the override applies to this record on the given day
    pub fn applies(&self, record: &BirthdayRecord, today_month: u32, today_day: u32) -> bool {
        record.name == self.name && matches_birthday(today_month, today_day, self.month, self.day)
    }
}

/// Build a single birthday announcement line
pub fn build_birthday_line(record: &BirthdayRecord) -> String {
    format!(
        "Today is **{}'s birthday**! 🎉 Please wish {} a happy birthday! 🎂",
        record.name,
        resolve(record.gender, PronounForm::Possessive)
    )
}

/// Build a bullet entry for listings
pub fn build_listing_entry(record: &BirthdayRecord) -> String {
    format!(
        "• {}, {} {}",
        record.name,
        get_month_name(record.month),
        record.day
    )
}

/// Render today's announcement. Empty when nobody matches.
pub fn render_today_announcement(
    records: &[BirthdayRecord],
    today_month: u32,
    today_day: u32,
    rule: &SentinelRule,
) -> String {
    let mut message = String::new();
    let mut sentinel_sent = false;

    for record in records {
        if rule.applies(record, today_month, today_day) {
            if !sentinel_sent {
                message.push_str(&rule.text);
                message.push('\n');
                sentinel_sent = true;
            }
        } else if matches_birthday(record.month, record.day, today_month, today_day) {
            message.push_str(&build_birthday_line(record));
            message.push('\n');
        }
    }

    message
}

/// Render the birthdays of one month. Empty when there are none.
pub fn render_month_listing(records: &[BirthdayRecord], month: u32) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut listing = format!("**{} Birthdays:**\n\n", get_month_name(month));
    for record in records {
        listing.push_str(&build_listing_entry(record));
        listing.push('\n');
    }
    listing
}

/// Render every birthday. The header is always present.
pub fn render_full_listing(records: &[BirthdayRecord]) -> String {
    let mut listing = String::from("**All Birthdays:**\n\n");
    for record in records {
        listing.push_str(&build_listing_entry(record));
        listing.push('\n');
    }
    listing
}

/// Prefix the month listing with the first-of-the-month greeting
pub fn build_monthly_digest(month: u32, listing: &str, fallback: &str) -> String {
    let body = if listing.is_empty() { fallback } else { listing };
    format!(
        "Happy {}! Below are all the birthdays this month:\n{}",
        get_month_name(month),
        body
    )
}
