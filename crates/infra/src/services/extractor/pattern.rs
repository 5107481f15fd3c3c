use super::IScheduleExtractor;
use chrono::{DateTime, Utc};
use regex::Regex;
use remindbot_domain::ScheduleCandidate;

/// Recognises an explicit `YYYY-MM-DD HH:MM` anywhere in the message and
/// takes the rest of the message as the task. Used when no language model
/// is configured.
pub struct PatternScheduleExtractor {
    date_time: Regex,
}

impl PatternScheduleExtractor {
    pub fn new() -> anyhow::Result<Self> {
        let date_time = Regex::new(r"\b(\d{4}-\d{2}-\d{2})[ T](\d{1,2}):(\d{2})\b")?;
        Ok(Self { date_time })
    }

    fn candidate(&self, text: &str) -> ScheduleCandidate {
        let captures = match self.date_time.captures(text) {
            Some(captures) => captures,
            None => return ScheduleCandidate::invalid(),
        };
        let (whole, date, hour, minute) = match (
            captures.get(0),
            captures.get(1),
            captures.get(2),
            captures.get(3),
        ) {
            (Some(whole), Some(date), Some(hour), Some(minute)) => {
                (whole, date.as_str(), hour.as_str(), minute.as_str())
            }
            _ => return ScheduleCandidate::invalid(),
        };

        let task = format!("{} {}", &text[..whole.start()], &text[whole.end()..]);
        let task = task.split_whitespace().collect::<Vec<_>>().join(" ");
        if task.is_empty() {
            return ScheduleCandidate::invalid();
        }

        let date_time_text = format!("{} {:0>2}:{}", date, hour, minute);
        ScheduleCandidate::new(date_time_text, task)
    }
}

#[async_trait::async_trait]
impl IScheduleExtractor for PatternScheduleExtractor {
    async fn extract(&self, text: &str, _now: DateTime<Utc>) -> anyhow::Result<ScheduleCandidate> {
        Ok(self.candidate(text))
    }
}
