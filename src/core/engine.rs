use crate::core::{Pipeline, RoadmapArtifact, RoadmapRequest};
use crate::domain::model::word_count;
use crate::utils::error::Result;

pub const ROADMAP_HEADING: &str = "### 🗺️ Your Personalized GenAI Learning Path";

#[derive(Debug, Clone)]
pub struct RoadmapOutcome {
    pub artifact: RoadmapArtifact,
    pub original_tokens: usize,
    pub compressed_tokens: usize,
    pub savings_percent: Option<f64>,
}

impl RoadmapOutcome {
    pub fn roadmap(&self) -> &str {
        &self.artifact.content
    }
}

/// Result of running only the local stages.
#[derive(Debug, Clone)]
pub struct PromptPreview {
    pub resume_words: usize,
    pub context_words: usize,
    pub context: String,
}

/// Runs the pipeline stages strictly in order; each stage blocks the next.
pub struct RoadmapEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RoadmapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs only when both inputs are present; returns `Ok(None)` without doing any work otherwise.
    pub async fn trigger(
        &self,
        document: Option<Vec<u8>>,
        goal: &str,
    ) -> Result<Option<RoadmapOutcome>> {
        match RoadmapRequest::from_inputs(document, goal) {
            Some(request) => self.run(&request).await.map(Some),
            None => {
                tracing::debug!("Resume or goal missing, nothing to do");
                Ok(None)
            }
        }
    }

    pub async fn run(&self, request: &RoadmapRequest) -> Result<RoadmapOutcome> {
        tracing::info!("Extracting resume...");
        let resume_text = self.pipeline.extract(request.document()).await?;
        tracing::debug!("Extracted {} words from resume", word_count(&resume_text));

        let context = self.pipeline.compose(&resume_text, request.goal()).await?;

        tracing::info!("Optimizing context...");
        let compression = self.pipeline.compress(&context).await;
        let savings_percent = compression.savings_percent();

        tracing::info!("Generating roadmap...");
        let roadmap = self.pipeline.generate(&compression.context).await?;

        let artifact = self.pipeline.load(roadmap).await?;
        tracing::debug!("Roadmap saved to: {}", artifact.path);

        Ok(RoadmapOutcome {
            artifact,
            original_tokens: compression.original_tokens,
            compressed_tokens: compression.compressed_tokens,
            savings_percent,
        })
    }

    /// Extract and compose without any network call.
    pub async fn preview(&self, request: &RoadmapRequest) -> Result<PromptPreview> {
        let resume_text = self.pipeline.extract(request.document()).await?;
        let context = self.pipeline.compose(&resume_text, request.goal()).await?;

        Ok(PromptPreview {
            resume_words: word_count(&resume_text),
            context_words: word_count(&context),
            context,
        })
    }
}
