use super::IReminderRepo;
use chrono::{DateTime, TimeZone, Utc};
use remindbot_domain::{partition_key, DispatchHandle, ReminderRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    subject_id: String,
    scheduled_at: i64,
    task: String,
    status: String,
    created_at: i64,
    dispatch_handle: String,
}

fn from_millis(millis: i64) -> anyhow::Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| anyhow::anyhow!("Timestamp out of range: {}", millis))
}

impl TryFrom<ReminderRaw> for ReminderRecord {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.reminder_uid.into(),
            subject_id: raw.subject_id,
            scheduled_at: from_millis(raw.scheduled_at)?,
            task: raw.task,
            status: raw.status.parse()?,
            created_at: from_millis(raw.created_at)?,
            dispatch_handle: DispatchHandle::new(raw.dispatch_handle),
        })
    }
}

fn to_domain(raw: ReminderRaw) -> Option<ReminderRecord> {
    let reminder_uid = raw.reminder_uid;
    ReminderRecord::try_from(raw)
        .map_err(|e| {
            error!(
                "Stored reminder with id: {:?} is corrupt. Error: {:?}",
                reminder_uid, e
            );
            e
        })
        .ok()
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &ReminderRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, partition_key, subject_id, scheduled_at, task, status, created_at, dispatch_handle)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.partition_key())
        .bind(&reminder.subject_id)
        .bind(reminder.scheduled_at.timestamp_millis())
        .bind(&reminder.task)
        .bind(reminder.status.as_str())
        .bind(reminder.created_at.timestamp_millis())
        .bind(reminder.dispatch_handle.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert reminder: {:?}. DB returned error: {:?}",
                reminder, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<ReminderRecord> {
        let res: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminder with id: {:?} failed. DB returned error: {:?}",
                reminder_id, e
            );
            e
        })
        .ok()?;
        res.and_then(to_domain)
    }

    async fn find_by_subject(&self, subject_id: &str) -> Vec<ReminderRecord> {
        let reminders: Vec<ReminderRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE partition_key = $1
            ORDER BY created_at
            "#,
        )
        .bind(partition_key(subject_id))
        .fetch_all(&self.pool)
        .await
        {
            Ok(reminders) => reminders,
            Err(e) => {
                error!(
                    "Find reminders for subject: {:?} failed. DB returned error: {:?}",
                    subject_id, e
                );
                return Vec::new();
            }
        };
        reminders.into_iter().filter_map(to_domain).collect()
    }
}
