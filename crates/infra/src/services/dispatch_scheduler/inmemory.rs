use super::IDispatchScheduler;
use chrono::{DateTime, Utc};
use remindbot_domain::{DeferredDispatch, DispatchHandle, ReminderEvent};
use std::sync::Mutex;
use tracing::info;

const SCHEDULE_GROUP: &str = "default";

pub struct InMemoryDispatchScheduler {
    dispatches: Mutex<Vec<DeferredDispatch>>,
}

impl InMemoryDispatchScheduler {
    pub fn new() -> Self {
        Self {
            dispatches: Mutex::new(Vec::new()),
        }
    }

    /// Registrations that have not fired yet
    pub fn pending(&self) -> Vec<DeferredDispatch> {
        self.dispatches.lock().unwrap().clone()
    }
}

fn handle_for(name: &str) -> DispatchHandle {
    DispatchHandle::new(format!("schedule/{}/{}", SCHEDULE_GROUP, name))
}

#[async_trait::async_trait]
impl IDispatchScheduler for InMemoryDispatchScheduler {
    async fn register(
        &self,
        name: &str,
        fire_at: DateTime<Utc>,
        payload: &ReminderEvent,
    ) -> anyhow::Result<DispatchHandle> {
        let mut dispatches = self.dispatches.lock().unwrap();
        if dispatches.iter().any(|d| d.name == name) {
            anyhow::bail!("A dispatch named: {} is already registered", name);
        }
        dispatches.push(DeferredDispatch {
            name: name.to_string(),
            fire_at,
            payload: payload.clone(),
        });
        info!("Registered dispatch: {} to fire at: {}", name, fire_at);

        Ok(handle_for(name))
    }

    async fn take_due(&self, now: DateTime<Utc>) -> Vec<DeferredDispatch> {
        let mut dispatches = self.dispatches.lock().unwrap();
        let mut due = Vec::new();
        let mut index = 0;
        while index < dispatches.len() {
            if dispatches[index].is_due(now) {
                due.push(dispatches.remove(index));
            } else {
                index += 1;
            }
        }
        due
    }
}
