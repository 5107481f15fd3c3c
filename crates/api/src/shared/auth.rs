use crate::error::RemindBotError;
use actix_web::HttpRequest;
use remindbot_infra::BotContext;

pub const DISPATCH_KEY_HEADER: &str = "remindbot-dispatch-key";

/// Only callers presenting the configured dispatch secret may trigger or
/// inspect reminders
pub fn protect_dispatch_route(req: &HttpRequest, ctx: &BotContext) -> Result<(), RemindBotError> {
    let key = req
        .headers()
        .get(DISPATCH_KEY_HEADER)
        .and_then(|key| key.to_str().ok());

    match key {
        Some(key) if key == ctx.config.dispatch_secret_code => Ok(()),
        Some(_) => Err(RemindBotError::Unauthorized(format!(
            "Invalid `{}` header provided",
            DISPATCH_KEY_HEADER
        ))),
        None => Err(RemindBotError::Unauthorized(format!(
            "Missing `{}` header",
            DISPATCH_KEY_HEADER
        ))),
    }
}
