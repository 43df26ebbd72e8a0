/// Birthday service - store-backed queries and roster administration
use std::sync::Arc;
use tracing::error;

use crate::database::{RosterStore, StoreError};
use crate::models::{BirthdayEntry, BirthdayRecord};
use crate::utils::clock::Clock;
use crate::utils::message_formatter::{
    render_full_listing, render_month_listing, render_today_announcement, SentinelRule,
};
use crate::utils::next_birthday::{find_next, NextBirthday};

/// Errors surfaced by administrative roster operations
#[derive(Debug, thiserror::Error)]
pub enum BirthdayError {
    #[error("Name must not be empty")]
    InvalidName,

    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("Day must be between 1 and 31, got {0}")]
    InvalidDay(u32),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service for birthday-related operations
///
/// Every call queries the store; nothing is cached between calls.
#[derive(Clone)]
pub struct BirthdayService {
    store: Arc<dyn RosterStore>,
    clock: Arc<dyn Clock>,
    rule: SentinelRule,
}

impl BirthdayService {
    /// Create a new birthday service
    pub fn new(store: Arc<dyn RosterStore>, clock: Arc<dyn Clock>, rule: SentinelRule) -> Self {
        Self { store, clock, rule }
    }

    /// Announcement for a given day. Empty when nobody has a birthday.
    pub async fn announcement_for(&self, month: u32, day: u32) -> String {
        let records = records_or_empty(
            self.store.get_by_date(month, day).await,
            "get_by_date",
            &format!("{}/{}", month, day),
        );
        render_today_announcement(&records, month, day, &self.rule)
    }

    /// Announcement for today according to the clock
    pub async fn today_announcement(&self) -> String {
        self.announcement_for(self.clock.current_month(), self.clock.current_day())
            .await
    }

    /// Listing for a month. Empty when the month has no birthdays.
    pub async fn month_listing(&self, month: u32) -> String {
        let records = records_or_empty(
            self.store.get_by_month(month).await,
            "get_by_month",
            &month.to_string(),
        );
        render_month_listing(&records, month)
    }

    /// Listing for the current month
    pub async fn current_month_listing(&self) -> String {
        self.month_listing(self.clock.current_month()).await
    }

    /// Listing of the whole roster (header always present)
    pub async fn full_listing(&self) -> String {
        let records = records_or_empty(self.store.get_all().await, "get_all", "*");
        render_full_listing(&records)
    }

    /// Nearest upcoming birthday(s) relative to now
    pub async fn next_birthday(&self) -> Option<NextBirthday> {
        let records = records_or_empty(self.store.get_all().await, "get_all", "*");
        find_next(&records, &self.clock.now())
    }

    /// Add a new birthday; duplicate names are rejected
    pub async fn add_birthday(&self, entry: BirthdayEntry) -> Result<(), BirthdayError> {
        let entry = validate_entry(entry)?;
        self.store.insert(&entry).await.map_err(|e| {
            log_write_error("insert", &entry.name, &e);
            e
        })?;
        Ok(())
    }

    /// Update an existing birthday
    pub async fn update_birthday(&self, entry: BirthdayEntry) -> Result<(), BirthdayError> {
        let entry = validate_entry(entry)?;
        self.store.update(&entry).await.map_err(|e| {
            log_write_error("update", &entry.name, &e);
            e
        })?;
        Ok(())
    }

    /// Remove a birthday by name
    pub async fn remove_birthday(&self, name: &str) -> Result<(), BirthdayError> {
        let name = validate_name(name)?;
        self.store.delete(&name).await.map_err(|e| {
            log_write_error("delete", &name, &e);
            e
        })?;
        Ok(())
    }

    /// Number of entries on the roster
    pub async fn roster_size(&self) -> Result<usize, StoreError> {
        Ok(self.store.get_all().await?.len())
    }

    /// Look up a birthday by name
    pub async fn get_birthday(&self, name: &str) -> Result<Option<BirthdayRecord>, BirthdayError> {
        let name = validate_name(name)?;
        Ok(self.store.get_by_name(&name).await?)
    }
}

/// Read failures on a render path degrade to an empty result set
fn records_or_empty(
    result: Result<Vec<BirthdayRecord>, StoreError>,
    operation: &str,
    key: &str,
) -> Vec<BirthdayRecord> {
    result.unwrap_or_else(|e| {
        error!("Roster {} failed for {}: {}", operation, key, e);
        Vec::new()
    })
}

fn log_write_error(operation: &str, name: &str, e: &StoreError) {
    match e {
        StoreError::NotFound(_) | StoreError::AlreadyExists(_) => {}
        _ => error!("Roster {} failed for {}: {}", operation, name, e),
    }
}

/// Validate a name (trimmed, non-empty)
fn validate_name(name: &str) -> Result<String, BirthdayError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BirthdayError::InvalidName);
    }
    Ok(name.to_string())
}

/// Validate month and day ranges. The day is not cross-checked against the month.
fn validate_birthday_date(month: u32, day: u32) -> Result<(), BirthdayError> {
    if !(1..=12).contains(&month) {
        return Err(BirthdayError::InvalidMonth(month));
    }
    if !(1..=31).contains(&day) {
        return Err(BirthdayError::InvalidDay(day));
    }
    Ok(())
}

fn validate_entry(entry: BirthdayEntry) -> Result<BirthdayEntry, BirthdayError> {
    let name = validate_name(&entry.name)?;
    validate_birthday_date(entry.month, entry.day)?;
    Ok(BirthdayEntry { name, ..entry })
}
