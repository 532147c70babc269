use std::sync::Arc;

use crate::config::Config;
use crate::parser::ResumeParser;
use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable persistence. Default: `PgResumeStore`.
    pub store: Arc<dyn ResumeStore>,
    /// Document decoder plus the skill vocabulary compiled at startup.
    pub parser: ResumeParser,
    pub config: Config,
}
