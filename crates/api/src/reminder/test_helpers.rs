use chrono::{DateTime, TimeZone, Utc};
use remindbot_domain::{DeferredDispatch, DispatchHandle, ReminderEvent, ReminderRecord, ID};
use remindbot_infra::{
    BotContext, IDispatchScheduler, IReminderRepo, ISys, InMemoryDispatchScheduler,
    InMemoryMessagingClient, INMEMORY_CHANNEL_SECRET,
};
use std::sync::Arc;

/// Clock frozen at one instant
pub struct StaticTimeSys(pub DateTime<Utc>);

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    fn get_timestamp_nanos(&self) -> i64 {
        self.0.timestamp_millis() * 1_000_000
    }
}

/// Inmemory context with time frozen at `2024-06-01 10:00` Asia/Taipei
pub struct TestContext {
    pub ctx: BotContext,
    pub now: DateTime<Utc>,
    pub messaging: Arc<InMemoryMessagingClient>,
    pub scheduler: Arc<InMemoryDispatchScheduler>,
}

impl TestContext {
    pub fn new() -> Self {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 2, 0, 0).unwrap();
        let messaging = Arc::new(InMemoryMessagingClient::new(INMEMORY_CHANNEL_SECRET));
        let scheduler = Arc::new(InMemoryDispatchScheduler::new());

        let mut ctx = BotContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(now));
        ctx.services.messaging = messaging.clone();
        ctx.services.dispatch_scheduler = scheduler.clone();

        Self {
            ctx,
            now,
            messaging,
            scheduler,
        }
    }
}

pub struct FailingDispatchScheduler;

#[async_trait::async_trait]
impl IDispatchScheduler for FailingDispatchScheduler {
    async fn register(
        &self,
        _name: &str,
        _fire_at: DateTime<Utc>,
        _payload: &ReminderEvent,
    ) -> anyhow::Result<DispatchHandle> {
        anyhow::bail!("Scheduler unavailable")
    }

    async fn take_due(&self, _now: DateTime<Utc>) -> Vec<DeferredDispatch> {
        Vec::new()
    }
}

pub struct FailingReminderRepo;

#[async_trait::async_trait]
impl IReminderRepo for FailingReminderRepo {
    async fn insert(&self, _reminder: &ReminderRecord) -> anyhow::Result<()> {
        anyhow::bail!("Storage unavailable")
    }

    async fn find(&self, _reminder_id: &ID) -> Option<ReminderRecord> {
        None
    }

    async fn find_by_subject(&self, _subject_id: &str) -> Vec<ReminderRecord> {
        Vec::new()
    }
}
