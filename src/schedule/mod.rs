/// Daily birthday scheduling
mod birthday_tasks;
mod manager;
mod types;

pub use manager::{DailyScheduler, start_schedule_manager};
