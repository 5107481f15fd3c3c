use crate::{APIResponse, BaseClient};
use remindbot_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct DispatchReminderInput {
    pub user_id: String,
    pub task: String,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Delivers a reminder right away, the way an external scheduler would
    pub async fn dispatch(
        &self,
        input: DispatchReminderInput,
    ) -> APIResponse<dispatch_reminder::APIResponse> {
        let body = dispatch_reminder::RequestBody {
            user_id: input.user_id,
            task: input.task,
        };
        self.base
            .post(body, "reminders/dispatch".into(), StatusCode::OK)
            .await
    }

    pub async fn get_by_subject(
        &self,
        subject_id: &str,
    ) -> APIResponse<get_subject_reminders::APIResponse> {
        self.base
            .get(format!("reminders/{}", subject_id), StatusCode::OK)
            .await
    }
}
