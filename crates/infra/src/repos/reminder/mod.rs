mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use remindbot_domain::{ReminderRecord, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<ReminderRecord>;
    /// All reminders stored under the partition of the given subject
    async fn find_by_subject(&self, subject_id: &str) -> Vec<ReminderRecord>;
}
