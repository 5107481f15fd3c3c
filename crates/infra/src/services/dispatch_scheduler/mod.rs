mod inmemory;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryDispatchScheduler;
use remindbot_domain::{DeferredDispatch, DispatchHandle, ReminderEvent};

/// One shot delayed delivery of `ReminderEvent`s
#[async_trait::async_trait]
pub trait IDispatchScheduler: Send + Sync {
    /// Registers a dispatch under a name that must not be in use already
    async fn register(
        &self,
        name: &str,
        fire_at: DateTime<Utc>,
        payload: &ReminderEvent,
    ) -> anyhow::Result<DispatchHandle>;
    /// Removes and returns every registration due at `now`. A registration
    /// is returned by at most one call.
    async fn take_due(&self, now: DateTime<Utc>) -> Vec<DeferredDispatch>;
}
