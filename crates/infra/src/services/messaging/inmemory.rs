use super::{events::parse_webhook_request, IMessagingClient, ParseRequestError, PushMessage};
use remindbot_domain::{UserProfile, WebhookEvent};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Messaging client that records every outbound message instead of sending it.
/// Profiles default to a display name equal to the user id.
pub struct InMemoryMessagingClient {
    channel_secret: String,
    profiles: Mutex<HashMap<String, String>>,
    replies: Mutex<Vec<(String, String)>>,
    pushes: Mutex<Vec<(String, PushMessage)>>,
    failing: AtomicBool,
    push_failing: AtomicBool,
}

impl InMemoryMessagingClient {
    pub fn new(channel_secret: impl Into<String>) -> Self {
        Self {
            channel_secret: channel_secret.into(),
            profiles: Mutex::new(HashMap::new()),
            replies: Mutex::new(Vec::new()),
            pushes: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            push_failing: AtomicBool::new(false),
        }
    }

    pub fn channel_secret(&self) -> &str {
        &self.channel_secret
    }

    pub fn set_display_name(&self, subject_id: &str, display_name: &str) {
        let mut profiles = self.profiles.lock().unwrap();
        profiles.insert(subject_id.to_string(), display_name.to_string());
    }

    /// Makes every outbound call fail until switched back
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes only pushes fail, profile lookups and replies still succeed
    pub fn set_push_failing(&self, failing: bool) {
        self.push_failing.store(failing, Ordering::SeqCst);
    }

    /// (reply token, text) pairs in the order they were sent
    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }

    /// (subject id, message) pairs in the order they were sent
    pub fn pushes(&self) -> Vec<(String, PushMessage)> {
        self.pushes.lock().unwrap().clone()
    }

    fn check_failing(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("Messaging platform unavailable");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl IMessagingClient for InMemoryMessagingClient {
    fn parse_request(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<Vec<WebhookEvent>, ParseRequestError> {
        parse_webhook_request(&self.channel_secret, signature, body)
    }

    async fn reply(&self, reply_token: &str, text: &str) -> anyhow::Result<()> {
        self.check_failing()?;
        let mut replies = self.replies.lock().unwrap();
        replies.push((reply_token.to_string(), text.to_string()));
        Ok(())
    }

    async fn push(&self, subject_id: &str, message: &PushMessage) -> anyhow::Result<()> {
        self.check_failing()?;
        if self.push_failing.load(Ordering::SeqCst) {
            anyhow::bail!("Push message rejected");
        }
        let mut pushes = self.pushes.lock().unwrap();
        pushes.push((subject_id.to_string(), message.clone()));
        Ok(())
    }

    async fn get_profile(&self, subject_id: &str) -> anyhow::Result<UserProfile> {
        self.check_failing()?;
        let profiles = self.profiles.lock().unwrap();
        let display_name = profiles
            .get(subject_id)
            .cloned()
            .unwrap_or_else(|| subject_id.to_string());
        Ok(UserProfile {
            user_id: subject_id.to_string(),
            display_name,
        })
    }
}
