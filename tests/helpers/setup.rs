use remindbot_api::Application;
use remindbot_infra::{BotContext, InMemoryMessagingClient, INMEMORY_CHANNEL_SECRET};
use remindbot_sdk::RemindBotSDK;
use std::sync::Arc;

pub struct TestApp {
    pub ctx: BotContext,
    pub messaging: Arc<InMemoryMessagingClient>,
}

// Inmemory context with a handle on its messaging client, no server or job attached
pub fn inmemory_context() -> (BotContext, Arc<InMemoryMessagingClient>) {
    let messaging = Arc::new(InMemoryMessagingClient::new(INMEMORY_CHANNEL_SECRET));
    let mut ctx = BotContext::create_inmemory();
    ctx.services.messaging = messaging.clone();
    (ctx, messaging)
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, RemindBotSDK, String) {
    let (mut ctx, messaging) = inmemory_context();
    ctx.config.port = 0; // Random port

    let dispatch_secret_code = ctx.config.dispatch_secret_code.clone();
    let app_ctx = ctx.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        ctx: app_ctx,
        messaging,
    };
    let sdk = RemindBotSDK::new(address.clone(), dispatch_secret_code);
    (app, sdk, address)
}
