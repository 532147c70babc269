//! Resume parser. Turns an uploaded document into `{text, skills, summary}`.
//!
//! Pipeline: `DocumentDecoder` pages → `extractor` joins them into one text →
//! `SkillMatcher` and `summary` both run over that text.
//!
//! The parser is stateless apart from the read-only vocabulary held by the
//! matcher. It does not log and does not retry; the caller decides what to do
//! with an `ExtractionError`.

pub mod decoder;
pub mod extractor;
pub mod skills;
pub mod summary;
pub mod vocabulary;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::decoder::DocumentDecoder;
use crate::parser::skills::SkillMatcher;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode document: {0}")]
    Decode(String),

    #[error("document extraction timed out after {0:?}")]
    Timeout(Duration),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Output of a single extraction call. Not persisted by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub text: String,
    pub skills: Vec<String>,
    pub summary: String,
}

impl ExtractionResult {
    /// The value callers substitute when extraction fails but the upload is
    /// still accepted.
    pub fn empty() -> Self {
        ExtractionResult {
            text: String::new(),
            skills: vec![],
            summary: String::new(),
        }
    }
}

/// Decoder + compiled vocabulary, shared across requests via `Arc`.
#[derive(Clone)]
pub struct ResumeParser {
    decoder: Arc<dyn DocumentDecoder>,
    matcher: Arc<SkillMatcher>,
}

impl ResumeParser {
    pub fn new(decoder: Arc<dyn DocumentDecoder>, matcher: Arc<SkillMatcher>) -> Self {
        Self { decoder, matcher }
    }

    /// Runs the full pipeline on an in-memory document.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ExtractionResult, ExtractionError> {
        let text = extractor::extract_text(self.decoder.as_ref(), bytes)?;
        Ok(self.analyze_text(text))
    }

    /// Reads `path` and runs the full pipeline on its contents.
    pub fn parse_file(&self, path: &Path) -> Result<ExtractionResult, ExtractionError> {
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Runs `parse_file` on the blocking pool, bounded by `budget`.
    /// A timeout is reported the same way as any other extraction failure.
    pub async fn parse_file_with_timeout(
        &self,
        path: PathBuf,
        budget: Duration,
    ) -> Result<ExtractionResult, ExtractionError> {
        let parser = self.clone();
        let task = tokio::task::spawn_blocking(move || parser.parse_file(&path));

        match tokio::time::timeout(budget, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(ExtractionError::Task(join_err.to_string())),
            Err(_) => Err(ExtractionError::Timeout(budget)),
        }
    }

    /// Skill matching and summary over already-extracted text. Total.
    pub fn analyze_text(&self, text: String) -> ExtractionResult {
        let skills = self.matcher.match_skills(&text);
        let summary = summary::summarize(&text);
        ExtractionResult {
            text,
            skills,
            summary,
        }
    }
}
