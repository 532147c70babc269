use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::ingest::{ingest_resume, UploadResponse};
use crate::resumes::upload::UploadedFile;
use crate::state::AppState;

const USER_ID_FIELD: &str = "user_id";
const FILE_FIELD: &str = "resume";

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileSkillsResponse {
    pub user_id: Uuid,
    pub skills: Vec<String>,
}

/// POST /api/v1/resumes
/// Multipart form with a `user_id` text field and a `resume` file field.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(USER_ID_FIELD) => {
                let raw = field.text().await.map_err(multipart_error)?;
                let parsed = Uuid::parse_str(raw.trim())
                    .map_err(|_| AppError::Validation(format!("'{raw}' is not a valid user_id")))?;
                user_id = Some(parsed);
            }
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            _ => {} // unknown fields are ignored
        }
    }

    let user_id = user_id.ok_or_else(|| AppError::Validation("user_id is required".into()))?;
    let file = file.ok_or_else(|| AppError::Validation("resume file is required".into()))?;

    let response = ingest_resume(&state, user_id, file).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = state
        .store
        .get_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(Json(resume))
}

/// GET /api/v1/resumes?user_id=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    Ok(Json(state.store.list_resumes(params.user_id).await?))
}

/// GET /api/v1/profile/skills?user_id=
pub async fn handle_get_profile_skills(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileSkillsResponse>, AppError> {
    let skills = state
        .store
        .get_profile_skills(params.user_id)
        .await?
        .map(|p| p.skills)
        .unwrap_or_default();
    Ok(Json(ProfileSkillsResponse {
        user_id: params.user_id,
        skills,
    }))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Malformed upload: {}", e.body_text()))
    }
}
