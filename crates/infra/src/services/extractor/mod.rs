mod openai;
mod pattern;
mod prompt;

use chrono::{DateTime, Utc};
pub use openai::{OpenAIScheduleExtractor, OPENAI_API_BASE_URL, OPENAI_DEFAULT_MODEL};
pub use pattern::PatternScheduleExtractor;
use remindbot_domain::ScheduleCandidate;

/// Turns free text into a `ScheduleCandidate`. A candidate with `is_valid`
/// set to false is a successful extraction, errors are reserved for failing
/// to reach or understand the extraction backend.
#[async_trait::async_trait]
pub trait IScheduleExtractor: Send + Sync {
    async fn extract(&self, text: &str, now: DateTime<Utc>) -> anyhow::Result<ScheduleCandidate>;
}
