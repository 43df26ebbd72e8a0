/// Pure functions for formatting error and success messages (Discord-agnostic)

/// Format a validation error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

/// Format an info message with emoji
pub fn format_info(message: &str) -> String {
    format!("ℹ️ {}", message)
}

/// Build an error message for invalid input
pub fn build_invalid_input_error(field_name: &str, expected: &str) -> String {
    format_error(&format!(
        "Invalid {}! Please enter {}.",
        field_name, expected
    ))
}

/// Build a database error message (generic, doesn't expose internals)
pub fn build_database_error() -> String {
    format_error("A database error occurred. Please try again later.")
}

/// Build a success message for saving data
pub fn build_save_success(item_type: &str) -> String {
    format_success(&format!("{} saved successfully!", item_type))
}

/// Build a success message for deleting data
pub fn build_delete_success(item_type: &str) -> String {
    format_success(&format!("{} deleted successfully!", item_type))
}

/// Append the slash command hint used by legacy `!` command fallbacks
pub fn with_slash_hint(fallback: &str, command: &str) -> String {
    format!("{} (Tip: Use /{} for slash commands)", fallback, command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error() {
        assert_eq!(format_error("Something failed"), "❌ Something failed");
    }

    #[test]
    fn test_format_success() {
        assert_eq!(format_success("It worked"), "✅ It worked");
    }

    #[test]
    fn test_format_info() {
        assert_eq!(format_info("Good to know"), "ℹ️ Good to know");
    }

    #[test]
    fn test_build_invalid_input_error() {
        let result = build_invalid_input_error("month", "a number between 1 and 12");
        assert!(result.contains("❌"));
        assert!(result.contains("month"));
        assert!(result.contains("1 and 12"));
    }

    #[test]
    fn test_build_database_error() {
        let result = build_database_error();
        assert!(result.contains("❌"));
        assert!(result.contains("database"));
    }

    #[test]
    fn test_build_save_success() {
        assert_eq!(build_save_success("Birthday"), "✅ Birthday saved successfully!");
    }

    #[test]
    fn test_build_delete_success() {
        assert_eq!(build_delete_success("Birthday"), "✅ Birthday deleted successfully!");
    }

    #[test]
    fn test_with_slash_hint() {
        assert_eq!(
            with_slash_hint("No birthdays this month!", "month"),
            "No birthdays this month! (Tip: Use /month for slash commands)"
        );
    }
}
