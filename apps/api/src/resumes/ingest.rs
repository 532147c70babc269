use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::NewResume;
use crate::parser::ExtractionResult;
use crate::resumes::upload::{persist_upload, sanitize_filename, validate_upload, UploadedFile};
use crate::state::AppState;

/// Shown to the user when the file was stored but could not be read.
pub const EXTRACTION_WARNING: &str =
    "Resume uploaded, but its text could not be extracted. No skills were added to your profile.";

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub resume_id: Uuid,
    pub filename: String,
    pub skills: Vec<String>,
    pub skill_count: usize,
    pub summary: String,
    pub profile_skills: Vec<String>,
    pub warning: Option<String>,
}

/// Stores an uploaded resume, extracts its skills, and merges them into the
/// user's profile.
///
/// Extraction failure does not fail the upload: the file and record are kept
/// with an empty result and a warning for the user.
pub async fn ingest_resume(
    state: &AppState,
    user_id: Uuid,
    file: UploadedFile,
) -> Result<UploadResponse, AppError> {
    validate_upload(&file, state.config.max_upload_bytes)?;

    let resume_id = Uuid::new_v4();
    let filename = sanitize_filename(&file.filename);
    let size_bytes = file.bytes.len() as i64;

    let stored_path =
        persist_upload(&state.config.upload_dir, user_id, resume_id, file.bytes).await?;
    info!(
        "Stored resume {resume_id} for user {user_id} at {} ({size_bytes} bytes)",
        stored_path.display()
    );

    let (result, warning) = match state
        .parser
        .parse_file_with_timeout(stored_path.clone(), state.config.extract_timeout)
        .await
    {
        Ok(result) => (result, None),
        Err(e) => {
            warn!("Resume {resume_id} extraction failed: {e}");
            (ExtractionResult::empty(), Some(EXTRACTION_WARNING.to_string()))
        }
    };

    let ExtractionResult {
        text,
        skills,
        summary,
    } = result;

    let stored = state
        .store
        .insert_resume_and_merge(NewResume {
            id: resume_id,
            user_id,
            original_filename: filename,
            stored_path: stored_path.to_string_lossy().into_owned(),
            size_bytes,
            raw_text: text,
            skills,
            summary,
            extraction_warning: warning,
        })
        .await;

    let (row, profile_skills) = match stored {
        Ok(stored) => stored,
        Err(e) => {
            // Nothing references the file once the record is rolled back.
            if let Err(rm) = tokio::fs::remove_file(&stored_path).await {
                warn!(
                    "Could not remove orphaned upload {}: {rm}",
                    stored_path.display()
                );
            }
            return Err(e);
        }
    };

    info!(
        "Resume {resume_id}: {} skills extracted, profile now has {}",
        row.skills.len(),
        profile_skills.len()
    );

    Ok(UploadResponse {
        resume_id: row.id,
        filename: row.original_filename,
        skill_count: row.skills.len(),
        skills: row.skills,
        summary: row.summary,
        profile_skills,
        warning: row.extraction_warning,
    })
}
