use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// One learning course. Field order is the order the model sees in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub title: String,
    pub provider: String,
    pub level: Level,
    pub duration: String,
    pub cost: String,
    pub skills: String,
    pub link: String,
}

/// Inputs for one roadmap run. Only constructible when both inputs are present.
#[derive(Debug, Clone)]
pub struct RoadmapRequest {
    document: Vec<u8>,
    goal: String,
}

impl RoadmapRequest {
    /// Returns `None` unless both the document and the goal are non-empty.
    pub fn from_inputs(document: Option<Vec<u8>>, goal: &str) -> Option<Self> {
        let document = document.filter(|bytes| !bytes.is_empty())?;
        if goal.is_empty() {
            return None;
        }
        Some(Self {
            document,
            goal: goal.to_string(),
        })
    }

    pub fn document(&self) -> &[u8] {
        &self.document
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    pub context: String,
    pub original_tokens: usize,
    pub compressed_tokens: usize,
}

impl CompressionResult {
    /// Identity result; both counts fall back to the whitespace word count.
    pub fn passthrough(context: &str) -> Self {
        let words = word_count(context);
        Self {
            context: context.to_string(),
            original_tokens: words,
            compressed_tokens: words,
        }
    }

    /// Percentage saved, rounded to one decimal. `None` when there is nothing to report.
    pub fn savings_percent(&self) -> Option<f64> {
        savings_percent(self.original_tokens, self.compressed_tokens)
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn savings_percent(original_tokens: usize, compressed_tokens: usize) -> Option<f64> {
    if original_tokens == 0 {
        return None;
    }
    let ratio = compressed_tokens as f64 / original_tokens.max(1) as f64;
    let savings = ((1.0 - ratio) * 100.0 * 10.0).round() / 10.0;
    (savings > 0.0).then_some(savings)
}

pub fn savings_message(savings: f64) -> String {
    format!("⚡ ScaleDown saved {:.1}% tokens!", savings)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadmapArtifact {
    pub file_name: String,
    pub path: String,
    pub content: String,
}

pub fn artifact_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("learning_path_{}.md", now.format("%Y%m%d_%H%M"))
}
