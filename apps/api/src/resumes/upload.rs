//! Upload intake: validates an uploaded resume and writes it to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use uuid::Uuid;

use crate::errors::AppError;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const MAX_FILENAME_CHARS: usize = 128;

/// A file received in the multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Accepts non-empty PDF uploads up to `max_bytes`.
pub fn validate_upload(file: &UploadedFile, max_bytes: usize) -> Result<(), AppError> {
    if !is_pdf(file) {
        return Err(AppError::Validation(format!(
            "Only PDF resumes are accepted (got '{}')",
            file.filename
        )));
    }
    if file.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if file.bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "Resume is {} bytes; the limit is {max_bytes} bytes",
            file.bytes.len()
        )));
    }
    Ok(())
}

fn is_pdf(file: &UploadedFile) -> bool {
    let by_extension = Path::new(&file.filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    let by_content_type = file
        .content_type
        .as_deref()
        .map(|ct| ct.eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        .unwrap_or(false);
    by_extension || by_content_type
}

/// Reduces a client-supplied filename to a safe display name: path
/// components stripped, only `[A-Za-z0-9._ -]` kept, length capped.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .take(MAX_FILENAME_CHARS)
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "resume.pdf".to_string()
    } else {
        cleaned
    }
}

/// Writes the upload to `<root>/<user_id>/<resume_id>.pdf` and returns the
/// final path. The bytes land in a temp file first and are renamed into
/// place, so a crashed write never leaves a partial resume behind.
pub async fn persist_upload(
    root: &Path,
    user_id: Uuid,
    resume_id: Uuid,
    bytes: Bytes,
) -> Result<PathBuf, AppError> {
    let dir = root.join(user_id.to_string());
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Storage(format!("cannot create {}: {e}", dir.display())))?;

    let target = dir.join(format!("{resume_id}.pdf"));
    let write_target = target.clone();
    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&write_target).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("upload write task failed: {e}")))?
    .map_err(|e| AppError::Storage(format!("cannot write {}: {e}", target.display())))?;

    Ok(target)
}
