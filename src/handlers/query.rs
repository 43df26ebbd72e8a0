use crate::constants::{
    NO_BIRTHDAYS_CONFIGURED, NO_BIRTHDAYS_THIS_MONTH, NO_UPCOMING_BIRTHDAYS, UNKNOWN_COMMAND_REPLY,
};
use crate::services::birthday_service::BirthdayService;
use crate::utils::messages::with_slash_hint;
use crate::utils::next_birthday::render_next_birthday;

/// The three read-only roster queries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryCommand {
    Month,
    All,
    Next,
}

impl QueryCommand {
    /// Match a command name exactly (no prefix, no trimming)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "month" => Some(Self::Month),
            "all" => Some(Self::All),
            "next" => Some(Self::Next),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::All => "all",
            Self::Next => "next",
        }
    }

    /// Reply used when the query has nothing to show
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::Month => NO_BIRTHDAYS_THIS_MONTH,
            Self::All => NO_BIRTHDAYS_CONFIGURED,
            Self::Next => NO_UPCOMING_BIRTHDAYS,
        }
    }
}

/// Rendered reply for a query, or `None` when there is nothing to show
async fn render(service: &BirthdayService, command: QueryCommand) -> Option<String> {
    match command {
        QueryCommand::Month => non_empty(service.current_month_listing().await),
        // The header is always present, so the fallback is never reached in practice
        QueryCommand::All => non_empty(service.full_listing().await),
        QueryCommand::Next => service
            .next_birthday()
            .await
            .map(|next| render_next_birthday(&next)),
    }
}

fn non_empty(reply: String) -> Option<String> {
    Some(reply).filter(|r| !r.is_empty())
}

/// Reply to a slash command query
pub async fn respond(service: &BirthdayService, command: QueryCommand) -> String {
    render(service, command)
        .await
        .unwrap_or_else(|| command.fallback().to_string())
}

/// Reply to a legacy `!` query; fallbacks point at the slash command
pub async fn respond_legacy(service: &BirthdayService, command: QueryCommand) -> String {
    match render(service, command).await {
        Some(reply) => reply,
        None => with_slash_hint(command.fallback(), command.name()),
    }
}

/// Reply to a structured command by name; unknown names get a fixed reply
pub async fn respond_to_structured(service: &BirthdayService, name: &str) -> String {
    match QueryCommand::from_name(name) {
        Some(command) => respond(service, command).await,
        None => UNKNOWN_COMMAND_REPLY.to_string(),
    }
}
