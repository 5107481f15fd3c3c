use crate::{
    error::RemindBotError,
    shared::usecase::{Subscriber, UseCase},
};
use chrono::{DateTime, Utc};
use remindbot_domain::{
    dispatch_registration_name, ReminderEvent, ReminderRecord, ScheduleCandidate,
    ScheduleTimeError, ValidatedSchedule,
};
use remindbot_infra::BotContext;
use tracing::{error, info};

/// Turns one inbound text message into at most one scheduled reminder
#[derive(Debug)]
pub struct ScheduleReminderUseCase {
    pub subject_id: String,
    pub reply_token: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntakeResolution {
    Acknowledged {
        date_time_text: String,
        task: String,
        reminder: ReminderRecord,
    },
    RejectedInvalidFormat,
    RejectedPastTime,
    RejectedFutureTime,
    /// The deferred dispatch could not be registered
    SchedulingFailed,
    /// The dispatch was registered but the record could not be stored.
    /// The registration stays in place.
    PersistenceFailed,
}

impl IntakeResolution {
    pub fn reply_text(&self) -> String {
        match self {
            Self::Acknowledged {
                date_time_text,
                task,
                ..
            } => format!("Reminder set: {} {}", date_time_text, task),
            Self::RejectedInvalidFormat => "Invalid format. Your message must contain a date, a time and what to be reminded about. Please try again.".into(),
            Self::RejectedPastTime => "Can't set a reminder in the past.".into(),
            Self::RejectedFutureTime => "Can't set a reminder more than one year ahead.".into(),
            Self::SchedulingFailed | Self::PersistenceFailed => {
                "Failed to set the reminder, please try again later.".into()
            }
        }
    }
}

#[derive(Debug)]
pub struct IntakeResponse {
    pub reply_token: String,
    pub resolution: IntakeResolution,
}

#[derive(Debug)]
pub enum UseCaseError {
    ExtractionFailure(String),
    MalformedTime(String),
}

impl From<UseCaseError> for RemindBotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ExtractionFailure(_) | UseCaseError::MalformedTime(_) => {
                Self::InternalError
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScheduleReminderUseCase {
    type Response = IntakeResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleReminder";

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();

        let candidate = ctx
            .services
            .extractor
            .extract(&self.text, now)
            .await
            .map_err(|e| UseCaseError::ExtractionFailure(e.to_string()))?;

        let resolution = self.resolve(candidate, now, ctx).await?;

        Ok(IntakeResponse {
            reply_token: self.reply_token.clone(),
            resolution,
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ReplyOnReminderIntake)]
    }
}

impl ScheduleReminderUseCase {
    async fn resolve(
        &self,
        candidate: ScheduleCandidate,
        now: DateTime<Utc>,
        ctx: &BotContext,
    ) -> Result<IntakeResolution, UseCaseError> {
        if !candidate.is_valid {
            return Ok(IntakeResolution::RejectedInvalidFormat);
        }

        let schedule = match ValidatedSchedule::validate(&candidate, now) {
            Ok(schedule) => schedule,
            Err(ScheduleTimeError::PastTime) => return Ok(IntakeResolution::RejectedPastTime),
            Err(ScheduleTimeError::FutureTimeOutOfRange) => {
                return Ok(IntakeResolution::RejectedFutureTime)
            }
            Err(ScheduleTimeError::MalformedTime(text)) => {
                return Err(UseCaseError::MalformedTime(text))
            }
        };

        let name = dispatch_registration_name(&self.subject_id, ctx.sys.get_timestamp_nanos());
        let payload = ReminderEvent::new(self.subject_id.clone(), schedule.task.clone());
        let handle = match ctx
            .services
            .dispatch_scheduler
            .register(&name, schedule.scheduled_at, &payload)
            .await
        {
            Ok(handle) => handle,
            Err(e) => {
                error!("Unable to register dispatch: {}. Error: {:?}", name, e);
                return Ok(IntakeResolution::SchedulingFailed);
            }
        };

        let reminder = ReminderRecord::new_pending(&self.subject_id, &schedule, handle, now);
        if let Err(e) = ctx.repos.reminders.insert(&reminder).await {
            error!(
                "Unable to store reminder for registered dispatch: {}. Error: {:?}",
                name, e
            );
            return Ok(IntakeResolution::PersistenceFailed);
        }
        info!(
            "Reminder for subject: {} scheduled at: {}",
            self.subject_id, reminder.scheduled_at
        );

        Ok(IntakeResolution::Acknowledged {
            date_time_text: candidate.date_time_text,
            task: schedule.task,
            reminder,
        })
    }
}

/// Sends the single reply every inbound message gets
pub struct ReplyOnReminderIntake;

#[async_trait::async_trait(?Send)]
impl Subscriber<ScheduleReminderUseCase> for ReplyOnReminderIntake {
    async fn notify(&self, e: &IntakeResponse, ctx: &BotContext) {
        let text = e.resolution.reply_text();
        if let Err(err) = ctx.services.messaging.reply(&e.reply_token, &text).await {
            error!(
                "Unable to send reply: {:?} with reply token: {}. Error: {:?}",
                text, e.reply_token, err
            );
        }
    }
}
