mod dispatch;
mod reminder;
mod schedule;
mod shared;
mod webhook;

pub use dispatch::{dispatch_registration_name, DeferredDispatch, DispatchHandle};
pub use reminder::{
    partition_key, ReminderEvent, ReminderRecord, ReminderStatus, REMINDER_PARTITION_PREFIX,
};
pub use schedule::{
    format_local_date_time, parse_local_date_time, validate_schedule_time, ScheduleCandidate,
    ScheduleTimeError, ValidatedSchedule, FIXED_TIMEZONE, LOCAL_DATE_TIME_FORMAT,
};
pub use shared::entity::{Entity, ID};
pub use webhook::{EventSource, InboundMessage, MessageEvent, UserProfile, WebhookEvent};
