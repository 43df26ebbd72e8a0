/// Bulk import of the legacy JSON roster file
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::database::StoreError;
use crate::models::{BirthdayEntry, Gender};
use crate::services::birthday_service::{BirthdayError, BirthdayService};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse roster file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Root of the roster file: `{"Birthdays": [...]}`
#[derive(Debug, Deserialize)]
pub struct People {
    #[serde(rename = "Birthdays", default)]
    pub people: Vec<Person>,
}

#[derive(Debug, Deserialize)]
pub struct Person {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Birthday")]
    pub birthday: PersonBirthday,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PersonBirthday {
    #[serde(rename = "Month")]
    pub month: i64,
    #[serde(rename = "Day")]
    pub day: i64,
}

/// Outcome of an import run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

pub fn parse_people(json: &str) -> Result<People, ImportError> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_people_file(path: &Path) -> Result<People, ImportError> {
    let json = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_people(&json)
}

impl Person {
    fn to_entry(&self) -> BirthdayEntry {
        // Out-of-range values become 0 and are rejected by validation
        let month = u32::try_from(self.birthday.month).unwrap_or(0);
        let day = u32::try_from(self.birthday.day).unwrap_or(0);

        let gender = self.gender.as_deref().and_then(|tag| {
            let gender = Gender::from_tag(tag);
            if gender.is_none() {
                warn!("Unknown gender '{}' for {}, using default pronouns", tag, self.name);
            }
            gender
        });

        BirthdayEntry::new(self.name.clone(), month, day).with_gender(gender)
    }
}

/// Insert every person. Existing names are skipped, other failures counted.
pub async fn import_people(birthdays: &BirthdayService, people: &People) -> ImportSummary {
    let mut summary = ImportSummary {
        total: people.people.len(),
        ..ImportSummary::default()
    };

    for person in &people.people {
        match birthdays.add_birthday(person.to_entry()).await {
            Ok(()) => {
                info!(
                    "Imported {} ({}/{})",
                    person.name, person.birthday.month, person.birthday.day
                );
                summary.imported += 1;
            }
            Err(BirthdayError::Store(StoreError::AlreadyExists(_))) => {
                info!("Skipping {} (already exists)", person.name);
                summary.skipped += 1;
            }
            Err(e) => {
                warn!("Failed to import {}: {}", person.name, e);
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Read the file at `path`, import it and log the result
pub async fn run_import(birthdays: &BirthdayService, path: &Path) -> Result<ImportSummary, ImportError> {
    info!("Importing birthdays from {}", path.display());
    let people = read_people_file(path)?;
    info!("Found {} birthdays in roster file", people.people.len());

    let summary = import_people(birthdays, &people).await;
    info!(
        "Import complete: {} imported, {} skipped, {} failed, {} total",
        summary.imported, summary.skipped, summary.failed, summary.total
    );

    let size = birthdays.roster_size().await?;
    info!("Roster now contains {} birthdays", size);

    Ok(summary)
}
