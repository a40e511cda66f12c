use crate::adapters::{
    gemini::GeminiClient, pdf::PdfExtractor, scaledown::ScaleDownClient, storage::LocalStorage,
};
use crate::config::AppConfig;
use crate::core::prompt;
use crate::core::{
    CompressionResult, ConfigProvider, DocumentExtractor, Notifier, Pipeline, PromptCompressor,
    RoadmapArtifact, RoadmapGenerator, Storage,
};
use crate::domain::catalog::Catalog;
use crate::domain::model::{artifact_file_name, savings_message};
use crate::utils::error::Result;
use chrono::Local;

pub struct RoadmapPipeline<X, P, G, S, C, N>
where
    X: DocumentExtractor,
    P: PromptCompressor,
    G: RoadmapGenerator,
    S: Storage,
    C: ConfigProvider,
    N: Notifier,
{
    extractor: X,
    compressor: P,
    generator: G,
    storage: S,
    config: C,
    notifier: N,
    catalog: Catalog,
}

impl<X, P, G, S, C, N> RoadmapPipeline<X, P, G, S, C, N>
where
    X: DocumentExtractor,
    P: PromptCompressor,
    G: RoadmapGenerator,
    S: Storage,
    C: ConfigProvider,
    N: Notifier,
{
    pub fn new(
        extractor: X,
        compressor: P,
        generator: G,
        storage: S,
        config: C,
        notifier: N,
        catalog: Catalog,
    ) -> Self {
        Self {
            extractor,
            compressor,
            generator,
            storage,
            config,
            notifier,
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Pipeline wired to the real services.
pub type ServicePipeline<N> =
    RoadmapPipeline<PdfExtractor, ScaleDownClient<N>, GeminiClient, LocalStorage, AppConfig, N>;

impl<N: Notifier + Clone> ServicePipeline<N> {
    pub fn from_config(config: AppConfig, catalog: Catalog, notifier: N) -> Self {
        let compressor = ScaleDownClient::new(
            config.compression.endpoint.clone(),
            config.compression.api_key.clone(),
            config.compression_timeout(),
            notifier.clone(),
        )
        .with_rate(config.compression_rate());

        let generator = GeminiClient::new(
            config.generation.endpoint.clone(),
            config.generation.model.clone(),
            config.generation.api_key.clone(),
        )
        .with_timeout(config.generation_timeout())
        .with_retry(config.retry_attempts(), config.retry_delay());

        let storage = LocalStorage::new(config.output_path().to_string());

        Self::new(
            PdfExtractor::new(),
            compressor,
            generator,
            storage,
            config,
            notifier,
            catalog,
        )
    }
}

#[async_trait::async_trait]
impl<X, P, G, S, C, N> Pipeline for RoadmapPipeline<X, P, G, S, C, N>
where
    X: DocumentExtractor,
    P: PromptCompressor,
    G: RoadmapGenerator,
    S: Storage,
    C: ConfigProvider,
    N: Notifier,
{
    async fn extract(&self, document: &[u8]) -> Result<String> {
        tracing::debug!("Extracting text from {} byte document", document.len());
        self.extractor.extract_text(document)
    }

    async fn compose(&self, resume_text: &str, goal: &str) -> Result<String> {
        prompt::compose_context(resume_text, goal, &self.catalog)
    }

    async fn compress(&self, context: &str) -> CompressionResult {
        let result = if self.config.compression_enabled() {
            self.compressor
                .compress(context, self.config.system_instruction())
                .await
        } else {
            tracing::debug!("Compression disabled, passing context through");
            CompressionResult::passthrough(context)
        };

        if let Some(savings) = result.savings_percent() {
            self.notifier.info(&savings_message(savings));
        }
        result
    }

    async fn generate(&self, context: &str) -> Result<String> {
        let input = prompt::final_input(context, self.config.system_instruction());
        self.generator.generate(&input).await
    }

    async fn load(&self, roadmap: String) -> Result<RoadmapArtifact> {
        let file_name = artifact_file_name(&Local::now());
        tracing::debug!("Writing {} ({} bytes)", file_name, roadmap.len());

        let path = self.storage.write_file(&file_name, roadmap.as_bytes()).await?;
        Ok(RoadmapArtifact {
            file_name,
            path,
            content: roadmap,
        })
    }
}
