/// Utility modules for common functionality
pub mod clock;
pub mod datetime;
pub mod message_formatter;
pub mod messages;
pub mod next_birthday;
pub mod pronouns;
pub mod timezone;
