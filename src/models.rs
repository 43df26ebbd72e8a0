use poise::serenity_prelude::ChannelId;

use crate::services::birthday_service::BirthdayService;

/// Gender tag used to pick pronouns in announcements
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Nonbinary,
    Other,
}

impl Gender {
    /// Parse a stored gender tag (case-insensitive). Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "nonbinary" => Some(Self::Nonbinary),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Tag as stored in the database
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Nonbinary => "nonbinary",
            Self::Other => "other",
        }
    }
}

/// A roster entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BirthdayRecord {
    pub id: i64,
    pub name: String,
    pub month: u32,
    pub day: u32,
    pub gender: Option<Gender>,
    /// Opaque external reference, usually a Discord user id
    pub external_id: Option<String>,
}

/// Fields supplied when creating or updating a roster entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BirthdayEntry {
    pub name: String,
    pub month: u32,
    pub day: u32,
    pub gender: Option<Gender>,
    pub external_id: Option<String>,
}

impl BirthdayEntry {
    pub fn new(name: impl Into<String>, month: u32, day: u32) -> Self {
        Self {
            name: name.into(),
            month,
            day,
            gender: None,
            external_id: None,
        }
    }

    pub fn with_gender(mut self, gender: Option<Gender>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_external_id(mut self, external_id: Option<String>) -> Self {
        self.external_id = external_id;
        self
    }
}

/// Bot state shared across all handlers
#[derive(Clone)]
pub struct Data {
    /// Store-backed birthday queries and roster administration
    pub birthdays: BirthdayService,
    /// Channel that receives the daily announcements
    pub channel_id: ChannelId,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_tag() {
        assert_eq!(Gender::from_tag("male"), Some(Gender::Male));
        assert_eq!(Gender::from_tag("Female"), Some(Gender::Female));
        assert_eq!(Gender::from_tag(" nonbinary "), Some(Gender::Nonbinary));
        assert_eq!(Gender::from_tag("other"), Some(Gender::Other));
        assert_eq!(Gender::from_tag("robot"), None);
        assert_eq!(Gender::from_tag(""), None);
    }

    #[test]
    fn test_gender_tag_round_trip() {
        for gender in [Gender::Male, Gender::Female, Gender::Nonbinary, Gender::Other] {
            assert_eq!(Gender::from_tag(gender.as_tag()), Some(gender));
        }
    }

    #[test]
    fn test_birthday_entry_builder() {
        let entry = BirthdayEntry::new("Alice", 3, 15)
            .with_gender(Some(Gender::Female))
            .with_external_id(Some("123".to_string()));
        assert_eq!(entry.name, "Alice");
        assert_eq!(entry.gender, Some(Gender::Female));
        assert_eq!(entry.external_id.as_deref(), Some("123"));
    }
}
