use crate::{
    error::RemindBotError,
    shared::{
        auth::protect_dispatch_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use remindbot_api_structs::dispatch_reminder::{APIResponse, RequestBody};
use remindbot_domain::ReminderEvent;
use remindbot_infra::{BotContext, PushMessage};
use tracing::info;

pub const REMINDER_SENDER_NAME: &str = "Reminder Bot";

pub async fn dispatch_reminder_controller(
    http_req: HttpRequest,
    ctx: web::Data<BotContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, RemindBotError> {
    protect_dispatch_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = SendReminderUseCase {
        event: ReminderEvent::new(body.user_id, body.task),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                user_id: res.subject_id,
                text: res.text,
            })
        })
        .map_err(RemindBotError::from)
}

/// Delivers a reminder whose time has come
#[derive(Debug)]
pub struct SendReminderUseCase {
    pub event: ReminderEvent,
}

#[derive(Debug)]
pub struct SentReminder {
    pub subject_id: String,
    pub text: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    ProfileLookupFailed(String),
    PushFailed(String),
}

impl From<UseCaseError> for RemindBotError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ProfileLookupFailed(_) | UseCaseError::PushFailed(_) => {
                Self::InternalError
            }
        }
    }
}

/// `@<display name>` on the first line, the task on the second
pub fn compose_reminder_text(display_name: &str, task: &str) -> String {
    format!("@{}\n{}", display_name, task)
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendReminderUseCase {
    type Response = SentReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminder";

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Error> {
        let subject_id = &self.event.subject_id;

        let profile = ctx
            .services
            .messaging
            .get_profile(subject_id)
            .await
            .map_err(|e| UseCaseError::ProfileLookupFailed(e.to_string()))?;

        let message = PushMessage {
            text: compose_reminder_text(&profile.display_name, &self.event.task),
            sender_name: Some(REMINDER_SENDER_NAME.into()),
        };
        ctx.services
            .messaging
            .push(subject_id, &message)
            .await
            .map_err(|e| UseCaseError::PushFailed(e.to_string()))?;
        info!("Reminder pushed to subject: {}", subject_id);

        Ok(SentReminder {
            subject_id: subject_id.clone(),
            text: message.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::test_helpers::TestContext;

    #[test]
    fn composes_mention() {
        assert_eq!(
            compose_reminder_text("Mei", "drink water"),
            "@Mei\ndrink water"
        );
    }

    #[actix_web::main]
    #[test]
    async fn pushes_reminder_once() {
        let t = TestContext::new();
        t.messaging.set_display_name("U1", "Mei");

        let usecase = SendReminderUseCase {
            event: ReminderEvent::new("U1", "drink water"),
        };
        let res = execute(usecase, &t.ctx).await.unwrap();
        assert_eq!(res.subject_id, "U1");

        let pushes = t.messaging.pushes();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].0, "U1");
        assert_eq!(pushes[0].1.text, "@Mei\ndrink water");
        assert_eq!(pushes[0].1.sender_name.as_deref(), Some("Reminder Bot"));
        assert!(t.messaging.replies().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn propagates_messaging_failure() {
        let t = TestContext::new();
        t.messaging.set_failing(true);

        let usecase = SendReminderUseCase {
            event: ReminderEvent::new("U1", "drink water"),
        };
        let res = execute(usecase, &t.ctx).await;

        assert!(matches!(res, Err(UseCaseError::ProfileLookupFailed(_))));
        assert!(t.messaging.pushes().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn propagates_push_failure_after_profile_lookup() {
        let t = TestContext::new();
        t.messaging.set_display_name("U1", "Mei");
        t.messaging.set_push_failing(true);

        let usecase = SendReminderUseCase {
            event: ReminderEvent::new("U1", "drink water"),
        };
        let res = execute(usecase, &t.ctx).await;

        assert!(matches!(res, Err(UseCaseError::PushFailed(_))));
        assert!(t.messaging.pushes().is_empty());
    }
}
