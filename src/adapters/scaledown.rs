use crate::domain::model::CompressionResult;
use crate::domain::ports::{Notifier, PromptCompressor};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const COMPRESS_PATH: &str = "/compress/raw/";

#[derive(Debug, Serialize)]
struct CompressRequest<'a> {
    context: &'a str,
    prompt: &'a str,
    scaledown: RateOptions<'a>,
}

#[derive(Debug, Serialize)]
struct RateOptions<'a> {
    rate: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompressResponse {
    compressed_prompt: String,
    #[serde(default)]
    original_prompt_tokens: usize,
    #[serde(default)]
    compressed_prompt_tokens: usize,
}

/// Client for the ScaleDown prompt-compression API.
///
/// Exactly one request is made per call. Any failure returns the context unchanged;
/// only a non-200 response is reported to the user.
pub struct ScaleDownClient<N: Notifier> {
    client: Client,
    endpoint: String,
    api_key: String,
    rate: String,
    timeout: Duration,
    notifier: N,
}

impl<N: Notifier> ScaleDownClient<N> {
    pub fn new(endpoint: String, api_key: String, timeout: Duration, notifier: N) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            rate: "auto".to_string(),
            timeout,
            notifier,
        }
    }

    pub fn with_rate(mut self, rate: impl Into<String>) -> Self {
        self.rate = rate.into();
        self
    }

    fn url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), COMPRESS_PATH)
    }

    async fn request(
        &self,
        context: &str,
        prompt: &str,
    ) -> std::result::Result<(StatusCode, Option<CompressResponse>), reqwest::Error> {
        let body = CompressRequest {
            context,
            prompt,
            scaledown: RateOptions { rate: &self.rate },
        };

        let response = self
            .client
            .post(self.url())
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok((status, None));
        }

        let parsed = response.json::<CompressResponse>().await?;
        Ok((status, Some(parsed)))
    }
}

#[async_trait::async_trait]
impl<N: Notifier> PromptCompressor for ScaleDownClient<N> {
    async fn compress(&self, context: &str, prompt: &str) -> CompressionResult {
        tracing::debug!("Requesting prompt compression from {}", self.url());

        match self.request(context, prompt).await {
            Ok((_, Some(parsed))) => {
                tracing::debug!(
                    "Compression returned {} -> {} tokens",
                    parsed.original_prompt_tokens,
                    parsed.compressed_prompt_tokens
                );
                CompressionResult {
                    context: parsed.compressed_prompt,
                    original_tokens: parsed.original_prompt_tokens,
                    compressed_tokens: parsed.compressed_prompt_tokens,
                }
            }
            Ok((status, None)) => {
                self.notifier.warn(&format!(
                    "ScaleDown (Token Optimizer) is currently unavailable (Error {}). Using full context instead.",
                    status.as_u16()
                ));
                CompressionResult::passthrough(context)
            }
            Err(e) => {
                tracing::debug!("Compression request failed, using full context: {}", e);
                CompressionResult::passthrough(context)
            }
        }
    }
}
