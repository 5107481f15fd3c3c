/// Where a webhook event originates from. Group and room ids are only
/// set for events sent in group chats.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventSource {
    pub user_id: Option<String>,
    pub group_id: Option<String>,
    pub room_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    Text { text: String },
    /// Stickers, images, locations and so on. These carry no behaviour.
    Other { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub reply_token: String,
    pub source: EventSource,
    pub message: InboundMessage,
}

/// An event delivered by the messaging platform webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    Message(MessageEvent),
    /// Follows, unfollows, postbacks and every other event kind
    Other { kind: String, source: EventSource },
}

impl WebhookEvent {
    pub fn kind(&self) -> &str {
        match self {
            Self::Message(_) => "message",
            Self::Other { kind, .. } => kind,
        }
    }

    pub fn source(&self) -> &EventSource {
        match self {
            Self::Message(e) => &e.source,
            Self::Other { source, .. } => source,
        }
    }
}

/// Public profile of a messaging platform user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
}
