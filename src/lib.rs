pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::adapters::{
    console::{ConsoleNotifier, RecordingNotifier},
    gemini::GeminiClient,
    pdf::PdfExtractor,
    scaledown::ScaleDownClient,
    storage::LocalStorage,
};
pub use crate::config::AppConfig;
pub use crate::core::{
    engine::{RoadmapEngine, RoadmapOutcome},
    pipeline::{RoadmapPipeline, ServicePipeline},
};
pub use crate::domain::catalog::Catalog;
pub use crate::utils::error::{AppError, Result};
