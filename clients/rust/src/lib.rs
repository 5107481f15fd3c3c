mod base;
mod reminder;
mod status;
mod webhook;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use reminder::ReminderClient;
pub use reminder::DispatchReminderInput;
pub use remindbot_api_structs::dtos::ReminderDTO as Reminder;
pub use reqwest::StatusCode;
use status::StatusClient;
use std::sync::Arc;
use webhook::WebhookClient;

/// Remindbot Server SDK
///
/// The SDK contains methods for interacting with the Remindbot server
/// API.
#[derive(Clone)]
pub struct RemindBotSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub webhook: WebhookClient,
}

impl RemindBotSDK {
    pub fn new<T: Into<String>>(address: String, dispatch_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_dispatch_key(dispatch_key.into());
        let base = Arc::new(base);

        Self {
            reminder: ReminderClient::new(base.clone()),
            status: StatusClient::new(base.clone()),
            webhook: WebhookClient::new(base),
        }
    }
}
