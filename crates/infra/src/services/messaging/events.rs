use super::{signature::verify_signature, ParseRequestError};
use remindbot_domain::{EventSource, InboundMessage, MessageEvent, WebhookEvent};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineWebhookBody {
    #[serde(default)]
    events: Vec<LineEventDTO>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineEventDTO {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    reply_token: Option<String>,
    #[serde(default)]
    source: Option<LineSourceDTO>,
    #[serde(default)]
    message: Option<LineMessageDTO>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineSourceDTO {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    room_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LineMessageDTO {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl From<LineSourceDTO> for EventSource {
    fn from(s: LineSourceDTO) -> Self {
        Self {
            user_id: s.user_id,
            group_id: s.group_id,
            room_id: s.room_id,
        }
    }
}

impl From<LineEventDTO> for WebhookEvent {
    fn from(e: LineEventDTO) -> Self {
        let source = e.source.map(EventSource::from).unwrap_or_default();
        match (e.kind.as_str(), e.message, e.reply_token) {
            ("message", Some(message), Some(reply_token)) => {
                let message = match (message.kind.as_str(), message.text) {
                    ("text", Some(text)) => InboundMessage::Text { text },
                    _ => InboundMessage::Other { kind: message.kind },
                };
                Self::Message(MessageEvent {
                    reply_token,
                    source,
                    message,
                })
            }
            _ => Self::Other {
                kind: e.kind,
                source,
            },
        }
    }
}

/// Verifies the signature of a webhook request and decodes its events
pub fn parse_webhook_request(
    channel_secret: &str,
    signature: Option<&str>,
    body: &[u8],
) -> Result<Vec<WebhookEvent>, ParseRequestError> {
    match signature {
        Some(signature) if verify_signature(channel_secret, signature, body) => (),
        _ => return Err(ParseRequestError::InvalidSignature),
    }

    let body: LineWebhookBody = serde_json::from_slice(body)
        .map_err(|e| ParseRequestError::MalformedBody(e.to_string()))?;

    Ok(body.events.into_iter().map(WebhookEvent::from).collect())
}
