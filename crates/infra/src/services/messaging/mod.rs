mod events;
mod inmemory;
mod line;
mod signature;

pub use events::parse_webhook_request;
pub use inmemory::InMemoryMessagingClient;
pub use line::LineMessagingClient;
use remindbot_domain::{UserProfile, WebhookEvent};
pub use signature::{sign_body, verify_signature};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRequestError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Malformed webhook body: {0}")]
    MalformedBody(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    pub text: String,
    /// Overrides the name the message is displayed as sent from
    pub sender_name: Option<String>,
}

/// Messaging platform the bot talks to its users through
#[async_trait::async_trait]
pub trait IMessagingClient: Send + Sync {
    /// Verifies the signature of the raw webhook body and decodes its events
    fn parse_request(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<Vec<WebhookEvent>, ParseRequestError>;
    async fn reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()>;
    async fn push(&self, subject_id: &str, message: &PushMessage) -> anyhow::Result<()>;
    async fn get_profile(&self, subject_id: &str) -> anyhow::Result<UserProfile>;
}
