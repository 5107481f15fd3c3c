use crate::reminder::ReminderEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier handed out by the scheduling service for a registered `DeferredDispatch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchHandle(String);

impl DispatchHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DispatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A one shot delivery of a `ReminderEvent` at or after `fire_at`
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredDispatch {
    /// Unique among all registrations
    pub name: String,
    pub fire_at: DateTime<Utc>,
    pub payload: ReminderEvent,
}

impl DeferredDispatch {
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.fire_at <= now
    }
}

/// Registration names combine the subject with a nanosecond timestamp so that
/// two reminders for the same subject never collide.
pub fn dispatch_registration_name(subject_id: &str, timestamp_nanos: i64) -> String {
    format!("reminder-{}-{}", subject_id, timestamp_nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn registration_names() {
        assert_eq!(
            dispatch_registration_name("U1", 1717207200000000001),
            "reminder-U1-1717207200000000001"
        );
        assert_ne!(
            dispatch_registration_name("U1", 1),
            dispatch_registration_name("U1", 2)
        );
    }

    #[test]
    fn dispatch_is_due_at_fire_time() {
        let fire_at = Utc.with_ymd_and_hms(2024, 6, 2, 1, 0, 0).unwrap();
        let dispatch = DeferredDispatch {
            name: "reminder-U1-1".into(),
            fire_at,
            payload: ReminderEvent::new("U1", "call mom"),
        };
        assert!(!dispatch.is_due(fire_at - Duration::seconds(1)));
        assert!(dispatch.is_due(fire_at));
        assert!(dispatch.is_due(fire_at + Duration::minutes(3)));
    }
}
