use remindbot_domain::{ReminderRecord, ReminderStatus, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub subject_id: String,
    /// Unix timestamp in millis
    pub scheduled_at: i64,
    pub task: String,
    pub status: ReminderStatus,
    pub created_at: i64,
    pub dispatch_handle: String,
}

impl ReminderDTO {
    pub fn new(reminder: ReminderRecord) -> Self {
        Self {
            id: reminder.id,
            subject_id: reminder.subject_id,
            scheduled_at: reminder.scheduled_at.timestamp_millis(),
            task: reminder.task,
            status: reminder.status,
            created_at: reminder.created_at.timestamp_millis(),
            dispatch_handle: reminder.dispatch_handle.as_str().to_string(),
        }
    }
}
