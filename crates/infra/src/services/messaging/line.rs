use super::{events::parse_webhook_request, IMessagingClient, ParseRequestError, PushMessage};
use remindbot_domain::{UserProfile, WebhookEvent};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

const LINE_API_BASE_URL: &str = "https://api.line.me";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LineSender {
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LineTextMessage {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sender: Option<LineSender>,
}

impl LineTextMessage {
    fn new(text: &str, sender_name: Option<&String>) -> Self {
        Self {
            kind: "text",
            text: text.to_string(),
            sender: sender_name.map(|name| LineSender { name: name.clone() }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest {
    reply_token: String,
    messages: Vec<LineTextMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushRequest {
    to: String,
    messages: Vec<LineTextMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    user_id: String,
    display_name: String,
}

/// Client for the LINE Messaging API
pub struct LineMessagingClient {
    client: Client,
    base_url: String,
    channel_secret: String,
    channel_token: String,
}

impl LineMessagingClient {
    pub fn new(channel_secret: String, channel_token: String) -> Self {
        Self::with_base_url(channel_secret, channel_token, LINE_API_BASE_URL.into())
    }

    pub fn with_base_url(channel_secret: String, channel_token: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            channel_secret,
            channel_token,
        }
    }

    /// Joins the segments onto the base url, escaping each one
    fn url(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("LINE API base url: {} cannot be a base", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post(&self, body: &impl Serialize, segments: &[&str]) -> anyhow::Result<()> {
        let res = self
            .client
            .post(self.url(segments)?)
            .bearer_auth(&self.channel_token)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] LINE API POST error. Error message: {:?}", e);
                anyhow::Error::new(e)
            })?;

        res.error_for_status().map(|_| ()).map_err(|e| {
            error!(
                "[Unexpected Response] LINE API POST error. Error message: {:?}",
                e
            );
            anyhow::Error::new(e)
        })
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, segments: &[&str]) -> anyhow::Result<T> {
        let res = self
            .client
            .get(self.url(segments)?)
            .bearer_auth(&self.channel_token)
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] LINE API GET error. Error message: {:?}", e);
                anyhow::Error::new(e)
            })?;

        match res.error_for_status() {
            Ok(res) => res.json::<T>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] LINE API GET error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            }),
            Err(e) => {
                error!(
                    "[Unexpected Response] LINE API GET error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}

#[async_trait::async_trait]
impl IMessagingClient for LineMessagingClient {
    fn parse_request(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<Vec<WebhookEvent>, ParseRequestError> {
        parse_webhook_request(&self.channel_secret, signature, body)
    }

    async fn reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()> {
        let body = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages: vec![LineTextMessage::new(text, None)],
        };
        self.post(&body, &["v2", "bot", "message", "reply"]).await
    }

    async fn push(&self, subject_id: &str, message: &PushMessage) -> anyhow::Result<()> {
        let body = PushRequest {
            to: subject_id.to_string(),
            messages: vec![LineTextMessage::new(
                &message.text,
                message.sender_name.as_ref(),
            )],
        };
        self.post(&body, &["v2", "bot", "message", "push"]).await
    }

    async fn get_profile(&self, subject_id: &str) -> anyhow::Result<UserProfile> {
        let profile: ProfileResponse = self.get(&["v2", "bot", "profile", subject_id]).await?;
        Ok(UserProfile {
            user_id: profile.user_id,
            display_name: profile.display_name,
        })
    }
}
