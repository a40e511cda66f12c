pub mod engine;
pub mod pipeline;
pub mod prompt;

pub use crate::domain::model::{CompressionResult, RoadmapArtifact, RoadmapRequest};
pub use crate::domain::ports::{
    ConfigProvider, DocumentExtractor, Notifier, Pipeline, PromptCompressor, RoadmapGenerator,
    Storage,
};
pub use crate::utils::error::Result;
