use remindbot_infra::{sign_body, INMEMORY_CHANNEL_SECRET};

/// Webhook body with a single text message from `user_id`
pub fn text_message_body(user_id: &str, reply_token: &str, text: &str) -> Vec<u8> {
    serde_json::json!({
        "destination": "Ubot",
        "events": [{
            "type": "message",
            "mode": "active",
            "timestamp": 1717207200000i64,
            "replyToken": reply_token,
            "source": { "type": "user", "userId": user_id },
            "message": { "id": "468789577898262530", "type": "text", "text": text }
        }]
    })
    .to_string()
    .into_bytes()
}

pub fn sign(body: &[u8]) -> Option<String> {
    Some(sign_body(INMEMORY_CHANNEL_SECRET, body))
}

