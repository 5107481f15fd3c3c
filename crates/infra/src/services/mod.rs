mod dispatch_scheduler;
mod extractor;
mod messaging;

pub use dispatch_scheduler::{IDispatchScheduler, InMemoryDispatchScheduler};
pub use extractor::{
    IScheduleExtractor, OpenAIScheduleExtractor, PatternScheduleExtractor, OPENAI_API_BASE_URL,
    OPENAI_DEFAULT_MODEL,
};
pub use messaging::{
    parse_webhook_request, sign_body, verify_signature, IMessagingClient, InMemoryMessagingClient,
    LineMessagingClient, ParseRequestError, PushMessage,
};
use std::sync::Arc;

/// Handles to the external collaborators of the bot
#[derive(Clone)]
pub struct Services {
    pub messaging: Arc<dyn IMessagingClient>,
    pub extractor: Arc<dyn IScheduleExtractor>,
    pub dispatch_scheduler: Arc<dyn IDispatchScheduler>,
}
