use async_trait::async_trait;
use poise::serenity_prelude::{self as serenity, ChannelId};
use std::sync::Arc;

/// Errors raised while delivering a message
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Failed to send message to channel {channel}: {reason}")]
    Transport { channel: ChannelId, reason: String },
}

/// Outbound side of the chat platform
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Send a text message to a channel
    async fn send(&self, destination: ChannelId, text: &str) -> Result<(), GatewayError>;
}

/// Gateway backed by the Discord HTTP client
#[derive(Clone)]
pub struct SerenityGateway {
    http: Arc<serenity::Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl MessageGateway for SerenityGateway {
    async fn send(&self, destination: ChannelId, text: &str) -> Result<(), GatewayError> {
        destination
            .say(&self.http, text)
            .await
            .map(|_| ())
            .map_err(|e| GatewayError::Transport {
                channel: destination,
                reason: e.to_string(),
            })
    }
}
