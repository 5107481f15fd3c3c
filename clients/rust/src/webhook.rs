use crate::{base::SIGNATURE_HEADER, APIResponse, BaseClient};
use remindbot_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct WebhookClient {
    base: Arc<BaseClient>,
}

impl WebhookClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Posts a webhook body as the messaging platform would. `signature`
    /// is sent in the signature header when given.
    pub async fn send(
        &self,
        body: Vec<u8>,
        signature: Option<String>,
    ) -> APIResponse<receive_webhook::APIResponse> {
        let headers = signature
            .map(|signature| vec![(SIGNATURE_HEADER, signature)])
            .unwrap_or_default();
        self.base
            .post_raw(body, headers, "webhook".into(), StatusCode::OK)
            .await
    }
}
