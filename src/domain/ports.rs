use crate::domain::model::{CompressionResult, RoadmapArtifact};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Writes `data` under the storage root and returns the full path written.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn system_instruction(&self) -> &str;
    fn compression_enabled(&self) -> bool;
    fn model(&self) -> &str;
}

pub trait DocumentExtractor: Send + Sync {
    fn extract_text(&self, document: &[u8]) -> Result<String>;
}

/// Never fails: an unavailable service yields [`CompressionResult::passthrough`].
#[async_trait]
pub trait PromptCompressor: Send + Sync {
    async fn compress(&self, context: &str, prompt: &str) -> CompressionResult;
}

#[async_trait]
pub trait RoadmapGenerator: Send + Sync {
    async fn generate(&self, input: &str) -> Result<String>;
}

/// User-visible notices, as opposed to log output.
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, document: &[u8]) -> Result<String>;
    async fn compose(&self, resume_text: &str, goal: &str) -> Result<String>;
    async fn compress(&self, context: &str) -> CompressionResult;
    async fn generate(&self, context: &str) -> Result<String>;
    async fn load(&self, roadmap: String) -> Result<RoadmapArtifact>;
}
