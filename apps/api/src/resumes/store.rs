//! Resume persistence: trait-based so handlers can run against PostgreSQL in
//! production and an in-memory store in tests.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`, chosen at startup.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ProfileSkillsRow;
use crate::models::resume::{NewResume, ResumeRow};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Inserts the resume and merges its skills into the owner's profile as
    /// one unit: either both are stored or neither is. Returns the new row
    /// and the profile's skill list afterwards.
    async fn insert_resume_and_merge(
        &self,
        resume: NewResume,
    ) -> Result<(ResumeRow, Vec<String>), AppError>;

    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError>;

    /// All resumes for a user, newest first.
    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError>;

    async fn get_profile_skills(&self, user_id: Uuid) -> Result<Option<ProfileSkillsRow>, AppError>;
}

/// Appends every skill in `incoming` not already present in `existing`
/// (case-insensitive). Existing order and casing are kept.
pub fn merge_skills(existing: &[String], incoming: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = existing.iter().map(|s| s.to_lowercase()).collect();
    let mut merged = existing.to_vec();
    for skill in incoming {
        if seen.insert(skill.to_lowercase()) {
            merged.push(skill.clone());
        }
    }
    merged
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn insert_resume_and_merge(
        &self,
        resume: NewResume,
    ) -> Result<(ResumeRow, Vec<String>), AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes
                (id, user_id, original_filename, stored_path, size_bytes,
                 raw_text, skills, summary, extraction_warning)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(resume.id)
        .bind(resume.user_id)
        .bind(&resume.original_filename)
        .bind(&resume.stored_path)
        .bind(resume.size_bytes)
        .bind(&resume.raw_text)
        .bind(&resume.skills)
        .bind(&resume.summary)
        .bind(&resume.extraction_warning)
        .fetch_one(&mut *tx)
        .await?;

        let existing: Option<Vec<String>> =
            sqlx::query_scalar("SELECT skills FROM profile_skills WHERE user_id = $1 FOR UPDATE")
                .bind(row.user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let existing = existing.unwrap_or_default();

        let profile_skills = if row.skills.is_empty() {
            existing
        } else {
            let merged = merge_skills(&existing, &row.skills);
            sqlx::query(
                r#"
                INSERT INTO profile_skills (user_id, skills, updated_at)
                VALUES ($1, $2, now())
                ON CONFLICT (user_id)
                DO UPDATE SET skills = EXCLUDED.skills, updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(row.user_id)
            .bind(&merged)
            .execute(&mut *tx)
            .await?;
            merged
        };

        tx.commit().await?;
        debug!("Inserted resume {} for user {}", row.id, row.user_id);
        Ok((row, profile_skills))
    }

    async fn get_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_profile_skills(&self, user_id: Uuid) -> Result<Option<ProfileSkillsRow>, AppError> {
        Ok(sqlx::query_as::<_, ProfileSkillsRow>(
            "SELECT * FROM profile_skills WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store for handler tests
// ────────────────────────────────────────────────────────────────────────────
