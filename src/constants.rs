/// Default time of day for the daily birthday check (HH:MM, 24-hour)
pub const DEFAULT_TRIGGER_TIME: &str = "09:00";

/// Default timezone used when none is configured
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Default location of the legacy JSON roster used by `import`
pub const DEFAULT_IMPORT_PATH: &str = "./config/birthdays.json";

/// Reserved name that triggers the date override message
pub const SENTINEL_NAME: &str = "Casey";

/// Month and day on which the sentinel override applies
pub const SENTINEL_MONTH: u32 = 1;
pub const SENTINEL_DAY: u32 = 6;

/// Text posted instead of a birthday line when the sentinel override applies
pub const SENTINEL_TEXT: &str =
    "Today is the anniversary of the **Capitol Riots**. Nothing else special happened today.";

/// Fallback replies when a query has nothing to show
pub const NO_BIRTHDAYS_THIS_MONTH: &str = "No birthdays this month!";
pub const NO_BIRTHDAYS_CONFIGURED: &str = "No birthdays configured!";
pub const NO_UPCOMING_BIRTHDAYS: &str = "No upcoming birthdays found!";

/// Reply for structured commands the bot does not know
pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "birthday_bot=info";
