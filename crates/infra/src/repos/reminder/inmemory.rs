use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use remindbot_domain::{partition_key, ReminderRecord, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<ReminderRecord>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<ReminderRecord> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_subject(&self, subject_id: &str) -> Vec<ReminderRecord> {
        let key = partition_key(subject_id);
        find_by(&self.reminders, |reminder| reminder.partition_key() == key)
    }
}
