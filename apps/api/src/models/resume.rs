use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_filename: String,
    pub stored_path: String,
    pub size_bytes: i64,
    pub raw_text: String,
    pub skills: Vec<String>,
    pub summary: String,
    /// Set when extraction failed and the upload was kept with an empty result.
    pub extraction_warning: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields the upload path supplies; `created_at` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_filename: String,
    pub stored_path: String,
    pub size_bytes: i64,
    pub raw_text: String,
    pub skills: Vec<String>,
    pub summary: String,
    pub extraction_warning: Option<String>,
}
