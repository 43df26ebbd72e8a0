use poise::serenity_prelude::{ChannelId, UserId};
use tracing::{debug, error};

use super::query::{QueryCommand, respond_legacy};
use crate::gateway::MessageGateway;
use crate::services::birthday_service::BirthdayService;

/// Legacy `!` command carried by a free-text message, if any
pub fn parse_legacy_command(content: &str) -> Option<QueryCommand> {
    content.strip_prefix('!').and_then(QueryCommand::from_name)
}

/// Handle a free-text message from the chat platform.
///
/// Messages written by the bot itself are dropped before any matching.
/// Text that is not exactly `!month`, `!all` or `!next` is ignored.
pub async fn handle_inbound_message(
    service: &BirthdayService,
    gateway: &dyn MessageGateway,
    bot_id: UserId,
    author_id: UserId,
    channel_id: ChannelId,
    content: &str,
) {
    if author_id == bot_id {
        return;
    }

    let Some(command) = parse_legacy_command(content) else {
        return;
    };

    debug!("Legacy !{} from {} in {}", command.name(), author_id, channel_id);

    let reply = respond_legacy(service, command).await;
    if let Err(e) = gateway.send(channel_id, &reply).await {
        error!("Failed to reply to !{}: {}", command.name(), e);
    }
}
