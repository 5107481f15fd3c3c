use crate::{
    dispatch::DispatchHandle,
    schedule::ValidatedSchedule,
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Prefix of the partition key every `ReminderRecord` is stored under
pub const REMINDER_PARTITION_PREFIX: &str = "E#";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Fired,
    Cancelled,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fired => "fired",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Unknown reminder status: {0}")]
pub struct InvalidReminderStatusError(String);

impl FromStr for ReminderStatus {
    type Err = InvalidReminderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "fired" => Ok(Self::Fired),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidReminderStatusError(s.to_string())),
        }
    }
}

/// A `ReminderRecord` is the persisted trace of a reminder a subject asked for.
///
/// It is created once when the deferred dispatch has been registered and is
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRecord {
    pub id: ID,
    /// The messaging platform user that asked for the reminder and will receive it
    pub subject_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub task: String,
    pub status: ReminderStatus,
    pub created_at: DateTime<Utc>,
    /// Identifies the deferred dispatch registration
    pub dispatch_handle: DispatchHandle,
}

impl ReminderRecord {
    pub fn new_pending(
        subject_id: &str,
        schedule: &ValidatedSchedule,
        dispatch_handle: DispatchHandle,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            subject_id: subject_id.to_string(),
            scheduled_at: schedule.scheduled_at,
            task: schedule.task.clone(),
            status: ReminderStatus::Pending,
            created_at,
            dispatch_handle,
        }
    }

    pub fn partition_key(&self) -> String {
        partition_key(&self.subject_id)
    }
}

pub fn partition_key(subject_id: &str) -> String {
    format!("{}{}", REMINDER_PARTITION_PREFIX, subject_id)
}

impl Entity<ID> for ReminderRecord {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// The payload carried by a deferred dispatch until it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEvent {
    #[serde(rename = "userId")]
    pub subject_id: String,
    pub task: String,
}

impl ReminderEvent {
    pub fn new(subject_id: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            task: task.into(),
        }
    }
}
