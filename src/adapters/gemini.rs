use crate::domain::ports::RoadmapGenerator;
use crate::utils::error::{AppError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let candidate = match self.candidates.into_iter().next() {
            Some(candidate) => candidate,
            None => {
                return Err(generation_error(match block_reason {
                    Some(reason) => format!("prompt was blocked ({})", reason),
                    None => "response contained no candidates".to_string(),
                }))
            }
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(generation_error(format!(
                "response contained no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

fn generation_error(message: impl Into<String>) -> AppError {
    AppError::GenerationError {
        message: message.into(),
    }
}

/// One failed attempt: whether another attempt may help, and why it failed.
struct AttemptFailure {
    retryable: bool,
    message: String,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl GeminiClient {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
            timeout: Duration::from_secs(120),
            retry_attempts: 1,
            retry_delay: Duration::from_secs(2),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        let model = self.model.trim_start_matches("models/");
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            model
        )
    }

    async fn attempt(&self, input: &str) -> std::result::Result<String, AttemptFailure> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: input }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AttemptFailure {
                retryable: e.is_timeout() || e.is_connect(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AttemptFailure {
                retryable: status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error(),
                message: format!("HTTP {}: {}", status.as_u16(), detail.trim()),
            });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| AttemptFailure {
                retryable: false,
                message: format!("malformed response: {}", e),
            })?;

        parsed.into_text().map_err(|e| AttemptFailure {
            retryable: false,
            message: match e {
                AppError::GenerationError { message } => message,
                other => other.to_string(),
            },
        })
    }
}

#[async_trait::async_trait]
impl RoadmapGenerator for GeminiClient {
    async fn generate(&self, input: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::debug!("Calling {} (attempt {})", self.model, attempt);

            match self.attempt(input).await {
                Ok(text) => return Ok(text),
                Err(failure) => {
                    if !failure.retryable || attempt > self.retry_attempts {
                        return Err(generation_error(failure.message));
                    }
                    tracing::warn!(
                        "Generation attempt {} failed, retrying in {:?}: {}",
                        attempt,
                        self.retry_delay,
                        failure.message
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> GeminiClient {
        GeminiClient::new(
            server.base_url(),
            "gemini-2.5-flash-lite".to_string(),
            "gm-test-key".to_string(),
        )
        .with_retry(1, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_generate_returns_joined_parts() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/models/gemini-2.5-flash-lite:generateContent")
                .header("x-goog-api-key", "gm-test-key")
                .json_body(serde_json::json!({
                    "contents": [{"role": "user", "parts": [{"text": "CONTEXT:\nx"}]}]
                }));
            then.status(200).json_body(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "# Week 1\n"}, {"text": "CS50"}]},
                    "finishReason": "STOP"
                }]
            }));
        });

        let text = client(&server).generate("CONTEXT:\nx").await.unwrap();

        api_mock.assert();
        assert_eq!(text, "# Week 1\nCS50");
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash-lite:generateContent");
            then.status(400)
                .json_body(serde_json::json!({"error": {"message": "API key not valid"}}));
        });

        let err = client(&server).generate("input").await.unwrap_err();

        api_mock.assert_hits(1);
        match err {
            AppError::GenerationError { message } => {
                assert!(message.contains("400"));
                assert!(message.contains("API key not valid"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_retried_once() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash-lite:generateContent");
            then.status(503).body("overloaded");
        });

        let result = client(&server).generate("input").await;

        api_mock.assert_hits(2);
        assert!(matches!(result, Err(AppError::GenerationError { .. })));
    }

    #[tokio::test]
    async fn test_retry_disabled() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash-lite:generateContent");
            then.status(500);
        });

        let result = client(&server)
            .with_retry(0, Duration::from_millis(10))
            .generate("input")
            .await;

        api_mock.assert_hits(1);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_generation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash-lite:generateContent");
            then.status(200).json_body(serde_json::json!({
                "candidates": [],
                "promptFeedback": {"blockReason": "SAFETY"}
            }));
        });

        let err = client(&server).generate("input").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Gemini API Error: prompt was blocked (SAFETY)"
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_generation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/models/gemini-2.5-flash-lite:generateContent");
            then.status(200).body("<html>not json</html>");
        });

        let err = client(&server).generate("input").await.unwrap_err();
        assert!(err.to_string().contains("malformed response"));
    }

    #[test]
    fn test_url_accepts_prefixed_model_name() {
        let client = GeminiClient::new(
            format!("{}/", GEMINI_API_BASE_URL),
            "models/gemini-2.5-flash-lite".to_string(),
            "k".to_string(),
        );
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-lite:generateContent"
        );
    }
}
