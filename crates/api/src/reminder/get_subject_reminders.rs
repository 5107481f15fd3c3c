use crate::{
    error::RemindBotError,
    shared::{
        auth::protect_dispatch_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use remindbot_api_structs::get_subject_reminders::{APIResponse, PathParams};
use remindbot_domain::ReminderRecord;
use remindbot_infra::BotContext;

pub async fn get_subject_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<BotContext>,
    path: web::Path<PathParams>,
) -> Result<HttpResponse, RemindBotError> {
    protect_dispatch_route(&http_req, &ctx)?;

    let usecase = GetSubjectRemindersUseCase {
        subject_id: path.into_inner().subject_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(RemindBotError::from)
}

#[derive(Debug)]
pub struct GetSubjectRemindersUseCase {
    pub subject_id: String,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for RemindBotError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetSubjectRemindersUseCase {
    type Response = Vec<ReminderRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetSubjectReminders";

    async fn execute(&mut self, ctx: &BotContext) -> Result<Self::Response, Self::Error> {
        let mut reminders = ctx.repos.reminders.find_by_subject(&self.subject_id).await;
        reminders.sort_by_key(|reminder| reminder.scheduled_at);
        Ok(reminders)
    }
}
