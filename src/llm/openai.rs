//! OpenAI-compatible chat-completion client.
//!
//! Talks to `POST {base_url}/chat/completions` with bearer authentication.
//! Only a connect timeout is set; generations may take as long as the
//! service needs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::errors::{ModelError, ModelResult};
use super::{ChatModel, CompletionParams};
use crate::session::Turn;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Connect timeout for the model service.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for an OpenAI-compatible service.
#[derive(Debug)]
pub struct OpenAiConfig {
    /// API base URL, e.g. `https://api.openai.com/v1`.
    pub base_url: Url,
    /// Secret bearer credential.
    pub api_key: SecretString,
    /// Model identifier sent with every request.
    pub model: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Async client for chat completions.
pub struct OpenAiChatClient {
    client: Client,
    endpoint: Url,
    api_key: SecretString,
    model: String,
}

impl OpenAiChatClient {
    /// Build a client from its configuration.
    ///
    /// # Errors
    /// Returns an error if the endpoint URL or the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> ModelResult<Self> {
        let endpoint = completions_endpoint(&config.base_url)?;
        let client = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key,
            model: config.model,
        })
    }

    /// Model identifier used for requests.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(&self, messages: &[Turn], params: CompletionParams) -> ModelResult<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            response_format: params.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!(
            model = %self.model,
            messages = messages.len(),
            max_tokens = params.max_tokens,
            "sending chat completion"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelError::EmptyCompletion)
    }
}

/// Append `chat/completions` to the base URL, keeping any path prefix.
fn completions_endpoint(base_url: &Url) -> ModelResult<Url> {
    let raw = format!("{}/chat/completions", base_url.as_str().trim_end_matches('/'));
    Url::parse(&raw).map_err(|e| ModelError::InvalidConfig(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;
    use crate::testing::spawn_router;

    fn client_for(base: &str) -> OpenAiChatClient {
        OpenAiChatClient::new(OpenAiConfig {
            base_url: Url::parse(base).unwrap(),
            api_key: SecretString::from("sk-test".to_string()),
            model: DEFAULT_MODEL.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_completions_endpoint_keeps_prefix() {
        let base = Url::parse("https://api.openai.com/v1").unwrap();
        assert_eq!(
            completions_endpoint(&base).unwrap().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );

        let slashed = Url::parse("http://localhost:9000/proxy/v1/").unwrap();
        assert_eq!(
            completions_endpoint(&slashed).unwrap().as_str(),
            "http://localhost:9000/proxy/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_complete_sends_history_and_params() {
        let seen: Arc<Mutex<Vec<(Option<String>, Value)>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorder = Arc::clone(&recorder);
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    recorder.lock().unwrap().push((auth, body));
                    Json(json!({
                        "choices": [{
                            "message": {
                                "role": "assistant",
                                "content": "What is the client name?"
                            }
                        }]
                    }))
                }
            }),
        );
        let addr = spawn_router(app).await;
        let client = client_for(&format!("http://{addr}/v1"));

        let reply = client
            .complete(
                &[Turn::system("collect"), Turn::user("hi")],
                CompletionParams::chat(500),
            )
            .await
            .unwrap();

        assert_eq!(reply, "What is the client name?");
        let seen = seen.lock().unwrap();
        let (auth, body) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert!(body.get("response_format").is_none());
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_json_output_sets_response_format() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let app = Router::new().route(
            "/chat/completions",
            post(move |Json(body): Json<Value>| {
                let recorder = Arc::clone(&recorder);
                async move {
                    *recorder.lock().unwrap() = Some(body);
                    Json(json!({ "choices": [{ "message": { "content": "{}" } }] }))
                }
            }),
        );
        let addr = spawn_router(app).await;
        let client = client_for(&format!("http://{addr}"));

        client
            .complete(&[Turn::user("x")], CompletionParams::chat(1000).with_json_output())
            .await
            .unwrap();

        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["max_tokens"], 1000);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let addr = spawn_router(app).await;
        let client = client_for(&format!("http://{addr}"));

        let err = client
            .complete(&[Turn::user("x")], CompletionParams::chat(500))
            .await
            .unwrap_err();

        match err {
            ModelError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_an_error() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let addr = spawn_router(app).await;
        let client = client_for(&format!("http://{addr}"));

        let err = client
            .complete(&[Turn::user("x")], CompletionParams::chat(500))
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::EmptyCompletion));
    }
}
