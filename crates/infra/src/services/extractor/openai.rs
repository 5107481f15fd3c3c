use super::{prompt::system_prompt, IScheduleExtractor};
use chrono::{DateTime, Utc};
use remindbot_domain::ScheduleCandidate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extracts schedules with an OpenAI compatible chat completions endpoint
pub struct OpenAIScheduleExtractor {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAIScheduleExtractor {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    async fn complete(&self, body: &ChatCompletionRequest<'_>) -> anyhow::Result<String> {
        let res = self
            .client
            .post(&format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] OpenAI API POST error. Error message: {:?}", e);
                anyhow::Error::new(e)
            })?;

        let res: ChatCompletionResponse = res
            .error_for_status()
            .map_err(anyhow::Error::new)?
            .json()
            .await
            .map_err(|e| {
                error!(
                    "[Unexpected Response] OpenAI API POST error. Error message: {:?}",
                    e
                );
                anyhow::Error::new(e)
            })?;

        res.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("Chat completion returned no content"))
    }
}

/// Models sometimes wrap their JSON answer in a markdown code fence
fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    match content.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => content,
    }
}

#[async_trait::async_trait]
impl IScheduleExtractor for OpenAIScheduleExtractor {
    async fn extract(&self, text: &str, now: DateTime<Utc>) -> anyhow::Result<ScheduleCandidate> {
        let system_prompt = system_prompt(now);
        let body = ChatCompletionRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        let content = self.complete(&body).await?;
        serde_json::from_str::<ScheduleCandidate>(strip_code_fence(&content)).map_err(|e| {
            error!(
                "Unable to parse schedule from chat completion content: {:?}. Error: {:?}",
                content, e
            );
            anyhow::Error::new(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 2, 0, 0).unwrap()
    }

    fn extractor(server: &MockServer) -> OpenAIScheduleExtractor {
        OpenAIScheduleExtractor::new("sk-test".into(), server.uri(), "gpt-4".into())
    }

    #[test]
    fn strips_code_fences() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("  {} "), "{}");
    }

    #[tokio::test]
    async fn extracts_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "gpt-4", "temperature": 0.0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                r#"{"dateTime": "2024-06-02 09:00", "task": "call mom", "valid": true}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let candidate = extractor(&server)
            .extract("remind me to call mom tomorrow at 9", now())
            .await
            .unwrap();
        assert_eq!(candidate, ScheduleCandidate::new("2024-06-02 09:00", "call mom"));

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert!(body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .ends_with("Current time: 2024-06-01 10:00"));
        assert_eq!(
            body["messages"][1]["content"],
            "remind me to call mom tomorrow at 9"
        );
    }

    #[tokio::test]
    async fn invalid_candidate_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "```json\n{\"dateTime\": \"\", \"task\": \"\", \"valid\": false}\n```",
            )))
            .mount(&server)
            .await;

        let candidate = extractor(&server).extract("hello", now()).await.unwrap();
        assert!(!candidate.is_valid);
    }

    #[tokio::test]
    async fn fails_on_unparseable_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Sure thing!")))
            .mount(&server)
            .await;

        assert!(extractor(&server).extract("hello", now()).await.is_err());
    }

    #[tokio::test]
    async fn fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "message": "Incorrect API key provided" }
            })))
            .mount(&server)
            .await;

        assert!(extractor(&server).extract("hello", now()).await.is_err());
    }
}
