mod helpers;

use chrono::{Duration, Utc};
use helpers::setup::{inmemory_context, spawn_app};
use helpers::webhook::{sign, text_message_body};
use remindbot_api::fire_due_dispatches;
use remindbot_domain::{format_local_date_time, ReminderEvent, ReminderStatus};
use remindbot_infra::IDispatchScheduler;
use remindbot_sdk::{APIError, DispatchReminderInput, RemindBotSDK, StatusCode};

fn assert_status<T: std::fmt::Debug>(res: Result<T, APIError>, expected: StatusCode) {
    match res {
        Err(APIError::UnexpectedStatusCode(status)) => assert_eq!(status, expected),
        other => panic!("Expected status code: {}, got: {:?}", expected, other),
    }
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_webhook_rejects_invalid_signature() {
    let (app, sdk, _) = spawn_app().await;
    let body = text_message_body("U1", "reply-token", "2030-01-01 09:00 call mom");

    assert_status(sdk.webhook.send(body.clone(), None).await, StatusCode::BAD_REQUEST);
    assert_status(
        sdk.webhook
            .send(body.clone(), Some("aW52YWxpZA==".into()))
            .await,
        StatusCode::BAD_REQUEST,
    );
    let mut tampered = body.clone();
    tampered.push(b' ');
    assert_status(sdk.webhook.send(tampered, sign(&body)).await, StatusCode::BAD_REQUEST);

    assert!(app.messaging.replies().is_empty());
}

#[actix_web::main]
#[test]
async fn test_webhook_fails_on_malformed_body() {
    let (app, sdk, _) = spawn_app().await;
    let body = b"{\"events\": ".to_vec();

    assert_status(
        sdk.webhook.send(body.clone(), sign(&body)).await,
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    assert!(app.messaging.replies().is_empty());
}

#[actix_web::main]
#[test]
async fn test_webhook_schedules_reminder() {
    let (app, sdk, _) = spawn_app().await;
    let when = format_local_date_time(&(Utc::now() + Duration::days(2)));
    let body = text_message_body("U1", "reply-token", &format!("{} call mom", when));

    let res = sdk
        .webhook
        .send(body.clone(), sign(&body))
        .await
        .expect("Expected webhook to be accepted");
    assert_eq!(res.received_events, 1);
    assert_eq!(res.handled_messages, 1);

    let replies = app.messaging.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].0, "reply-token");
    assert!(replies[0].1.contains(&when));
    assert!(replies[0].1.contains("call mom"));

    let reminders = sdk
        .reminder
        .get_by_subject("U1")
        .await
        .expect("Expected to list reminders")
        .reminders;
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].task, "call mom");
    assert_eq!(reminders[0].status, ReminderStatus::Pending);

    let due = app
        .ctx
        .services
        .dispatch_scheduler
        .take_due(Utc::now() + Duration::days(3))
        .await;
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].payload, ReminderEvent::new("U1", "call mom"));
    assert_eq!(due[0].fire_at.timestamp_millis(), reminders[0].scheduled_at);
    assert!(reminders[0].dispatch_handle.ends_with(&due[0].name));
}

#[actix_web::main]
#[test]
async fn test_webhook_rejections_reply_without_scheduling() {
    let (app, sdk, _) = spawn_app().await;
    let past = format_local_date_time(&(Utc::now() - Duration::hours(1)));
    let too_far = format_local_date_time(&(Utc::now() + Duration::days(400)));

    for text in [
        "call mom tomorrow".to_string(),
        format!("{} call mom", past),
        format!("{} call mom", too_far),
    ] {
        let body = text_message_body("U1", "reply-token", &text);
        let res = sdk
            .webhook
            .send(body.clone(), sign(&body))
            .await
            .expect("Expected webhook to be accepted");
        assert_eq!(res.handled_messages, 1);
    }

    let replies = app.messaging.replies();
    assert_eq!(replies.len(), 3);
    assert!(replies[0].1.starts_with("Invalid format"));
    assert!(replies[1].1.contains("past"));
    assert!(replies[2].1.contains("one year"));

    let reminders = sdk.reminder.get_by_subject("U1").await.unwrap().reminders;
    assert!(reminders.is_empty());
    assert!(app
        .ctx
        .services
        .dispatch_scheduler
        .take_due(Utc::now() + Duration::days(800))
        .await
        .is_empty());
}

#[actix_web::main]
#[test]
async fn test_webhook_ignores_non_text_events() {
    let (app, sdk, _) = spawn_app().await;
    let body = serde_json::json!({
        "events": [
            { "type": "follow", "replyToken": "t1", "source": { "type": "user", "userId": "U1" } },
            {
                "type": "message",
                "replyToken": "t2",
                "source": { "type": "user", "userId": "U1" },
                "message": { "id": "1", "type": "sticker", "packageId": "446", "stickerId": "1988" }
            }
        ]
    })
    .to_string()
    .into_bytes();

    let res = sdk.webhook.send(body.clone(), sign(&body)).await.unwrap();
    assert_eq!(res.received_events, 2);
    assert_eq!(res.handled_messages, 0);
    assert!(app.messaging.replies().is_empty());
}

#[actix_web::main]
#[test]
async fn test_dispatch_requires_key() {
    let (app, _, address) = spawn_app().await;
    let sdk = RemindBotSDK::new(address, "wrong-key");

    let input = DispatchReminderInput {
        user_id: "U1".into(),
        task: "drink water".into(),
    };
    assert_status(sdk.reminder.dispatch(input).await, StatusCode::UNAUTHORIZED);
    assert_status(sdk.reminder.get_by_subject("U1").await, StatusCode::UNAUTHORIZED);
    assert!(app.messaging.pushes().is_empty());
}

#[actix_web::main]
#[test]
async fn test_dispatch_pushes_reminder() {
    let (app, sdk, _) = spawn_app().await;
    app.messaging.set_display_name("U1", "Mei");

    let input = DispatchReminderInput {
        user_id: "U1".into(),
        task: "drink water".into(),
    };
    let res = sdk
        .reminder
        .dispatch(input)
        .await
        .expect("Expected reminder to be dispatched");
    assert_eq!(res.user_id, "U1");
    assert_eq!(res.text, "@Mei\ndrink water");

    let pushes = app.messaging.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].0, "U1");
    assert!(pushes[0].1.text.contains("drink water"));
    assert_eq!(pushes[0].1.sender_name.as_deref(), Some("Reminder Bot"));
}

#[actix_web::main]
#[test]
async fn test_dispatch_failure_is_propagated() {
    let (app, sdk, _) = spawn_app().await;
    app.messaging.set_failing(true);

    let input = DispatchReminderInput {
        user_id: "U1".into(),
        task: "drink water".into(),
    };
    assert_status(sdk.reminder.dispatch(input).await, StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::main]
#[test]
async fn test_rejected_push_is_propagated() {
    let (app, sdk, _) = spawn_app().await;
    app.messaging.set_display_name("U1", "Mei");
    app.messaging.set_push_failing(true);

    let input = DispatchReminderInput {
        user_id: "U1".into(),
        task: "drink water".into(),
    };
    assert_status(sdk.reminder.dispatch(input).await, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.messaging.pushes().is_empty());
}

#[actix_web::main]
#[test]
async fn test_due_dispatches_are_fired_once() {
    // No server here, so the minutely job cannot take the registration first
    let (ctx, messaging) = inmemory_context();
    ctx.services
        .dispatch_scheduler
        .register(
            "reminder-U1-1",
            Utc::now() - Duration::seconds(1),
            &ReminderEvent::new("U1", "drink water"),
        )
        .await
        .unwrap();

    assert_eq!(fire_due_dispatches(ctx.clone()).await, 1);
    assert_eq!(fire_due_dispatches(ctx.clone()).await, 0);

    let pushes = messaging.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].1.text, "@U1\ndrink water");
}
