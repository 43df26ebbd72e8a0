// Command modules
mod query;
mod roster;

// Re-export all commands
pub use query::{all, month, next};
pub use roster::{add_birthday, remove_birthday, show_birthday, update_birthday};
