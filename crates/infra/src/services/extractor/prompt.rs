use chrono::{DateTime, Utc};
use remindbot_domain::format_local_date_time;

const TIME_PARSER_SYSTEM_PROMPT: &str = r#"You extract reminders from chat messages.
Find the date and time the user wants to be reminded at and what they want to be reminded about.
Resolve relative expressions such as "tomorrow", "next monday" or "in two hours" against the current time given below.
All times are local times in the Asia/Taipei time zone.
Answer with a single JSON object and nothing else:
{"dateTime": "YYYY-MM-DD HH:MM", "task": "<what to be reminded about>", "valid": true}
If the message does not contain both a point in time and a task, answer:
{"dateTime": "", "task": "", "valid": false}"#;

pub fn system_prompt(now: DateTime<Utc>) -> String {
    format!(
        "{}\nCurrent time: {}",
        TIME_PARSER_SYSTEM_PROMPT,
        format_local_date_time(&now)
    )
}
