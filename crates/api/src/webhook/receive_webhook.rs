use crate::{
    error::RemindBotError, reminder::schedule_reminder::ScheduleReminderUseCase,
    shared::usecase::execute,
};
use actix_web::{web, HttpRequest, HttpResponse};
use remindbot_api_structs::receive_webhook::APIResponse;
use remindbot_domain::{InboundMessage, WebhookEvent};
use remindbot_infra::{BotContext, ParseRequestError};
use tracing::{error, info};

pub const SIGNATURE_HEADER: &str = "x-line-signature";

impl From<ParseRequestError> for RemindBotError {
    fn from(e: ParseRequestError) -> Self {
        match e {
            ParseRequestError::InvalidSignature => Self::InvalidSignature,
            ParseRequestError::MalformedBody(_) => Self::InternalError,
        }
    }
}

pub async fn receive_webhook_controller(
    http_req: HttpRequest,
    ctx: web::Data<BotContext>,
    body: web::Bytes,
) -> Result<HttpResponse, RemindBotError> {
    let signature = http_req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|signature| signature.to_str().ok());

    let events = ctx
        .services
        .messaging
        .parse_request(signature, &body)
        .map_err(|e| {
            error!("Unable to parse webhook request. Error: {:?}", e);
            RemindBotError::from(e)
        })?;

    let received_events = events.len();
    let mut handled_messages = 0;
    for event in events {
        let source = event.source();
        info!(
            event_type = event.kind(),
            user_id = ?source.user_id,
            group_id = ?source.group_id,
            room_id = ?source.room_id,
            "Received webhook event"
        );

        if let Some(usecase) = intake_for(event) {
            execute(usecase, &ctx).await?;
            handled_messages += 1;
        }
    }

    Ok(HttpResponse::Ok().json(APIResponse {
        received_events,
        handled_messages,
    }))
}

/// Only text messages from an identifiable user can become reminders
fn intake_for(event: WebhookEvent) -> Option<ScheduleReminderUseCase> {
    match event {
        WebhookEvent::Message(message) => match (message.message, message.source.user_id) {
            (InboundMessage::Text { text }, Some(subject_id)) => Some(ScheduleReminderUseCase {
                subject_id,
                reply_token: message.reply_token,
                text,
            }),
            (InboundMessage::Text { .. }, None) | (InboundMessage::Other { .. }, _) => None,
        },
        WebhookEvent::Other { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remindbot_domain::{EventSource, MessageEvent};

    fn message_event(user_id: Option<&str>, message: InboundMessage) -> WebhookEvent {
        WebhookEvent::Message(MessageEvent {
            reply_token: "reply-token".into(),
            source: EventSource {
                user_id: user_id.map(String::from),
                ..Default::default()
            },
            message,
        })
    }

    #[test]
    fn text_messages_go_through_intake() {
        let usecase = intake_for(message_event(
            Some("U1"),
            InboundMessage::Text {
                text: "2024-06-02 09:00 call mom".into(),
            },
        ))
        .unwrap();

        assert_eq!(usecase.subject_id, "U1");
        assert_eq!(usecase.reply_token, "reply-token");
        assert_eq!(usecase.text, "2024-06-02 09:00 call mom");
    }

    #[test]
    fn other_events_are_ignored() {
        assert!(intake_for(message_event(
            Some("U1"),
            InboundMessage::Other {
                kind: "sticker".into()
            }
        ))
        .is_none());
        assert!(intake_for(message_event(
            None,
            InboundMessage::Text {
                text: "2024-06-02 09:00 call mom".into()
            }
        ))
        .is_none());
        assert!(intake_for(WebhookEvent::Other {
            kind: "follow".into(),
            source: Default::default()
        })
        .is_none());
    }

    #[test]
    fn parse_errors_map_to_status() {
        assert!(matches!(
            RemindBotError::from(ParseRequestError::InvalidSignature),
            RemindBotError::InvalidSignature
        ));
        assert!(matches!(
            RemindBotError::from(ParseRequestError::MalformedBody("eof".into())),
            RemindBotError::InternalError
        ));
    }
}
