mod config;
mod repos;
mod services;
mod system;

use anyhow::Context;
pub use config::Config;
pub use repos::{IReminderRepo, InMemoryReminderRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::{info, warn};

#[derive(Clone)]
pub struct BotContext {
    pub repos: Repos,
    pub services: Services,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

/// Channel secret the inmemory context signs and verifies webhook bodies with
pub const INMEMORY_CHANNEL_SECRET: &str = "remindbot-test-channel-secret";

struct ContextParams {
    line_channel_secret: String,
    line_channel_token: String,
    openai: Option<OpenAIParams>,
    postgres_connection_string: Option<String>,
}

struct OpenAIParams {
    api_key: String,
    base_url: String,
    model: String,
}

impl BotContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = match &params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(connection_string)
                .await
                .context("Postgres credentials must be valid")?,
            None => {
                warn!("DATABASE_URL is not set. Reminders will only be stored in memory.");
                Repos::create_inmemory()
            }
        };

        let extractor: Arc<dyn IScheduleExtractor> = match params.openai {
            Some(openai) => {
                info!("Extracting schedules with model: {}", openai.model);
                Arc::new(OpenAIScheduleExtractor::new(
                    openai.api_key,
                    openai.base_url,
                    openai.model,
                ))
            }
            None => {
                warn!("OPENAI_API_KEY is not set. Falling back to pattern based schedule extraction.");
                Arc::new(PatternScheduleExtractor::new()?)
            }
        };

        let services = Services {
            messaging: Arc::new(LineMessagingClient::new(
                params.line_channel_secret,
                params.line_channel_token,
            )),
            extractor,
            dispatch_scheduler: Arc::new(InMemoryDispatchScheduler::new()),
        };

        Ok(Self {
            repos,
            services,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        })
    }

    /// Context with every collaborator kept in memory, used by tests
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            services: Services {
                messaging: Arc::new(InMemoryMessagingClient::new(INMEMORY_CHANNEL_SECRET)),
                extractor: Arc::new(
                    PatternScheduleExtractor::new().expect("Date time pattern to be valid"),
                ),
                dispatch_scheduler: Arc::new(InMemoryDispatchScheduler::new()),
            },
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<BotContext> {
    let openai = optional_env("OPENAI_API_KEY").map(|api_key| OpenAIParams {
        api_key,
        base_url: optional_env("OPENAI_BASE_URL")
            .unwrap_or_else(|| OPENAI_API_BASE_URL.to_string()),
        model: optional_env("OPENAI_MODEL")
            .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
    });

    BotContext::create(ContextParams {
        line_channel_secret: required_env("LINE_CHANNEL_SECRET")?,
        line_channel_token: required_env("LINE_CHANNEL_TOKEN")?,
        openai,
        postgres_connection_string: optional_env("DATABASE_URL"),
    })
    .await
}

fn required_env(name: &str) -> anyhow::Result<String> {
    optional_env(name).with_context(|| format!("{} env var to be present.", name))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
