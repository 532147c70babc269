use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The structured skill list accumulated on a user's profile.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileSkillsRow {
    pub user_id: Uuid,
    pub skills: Vec<String>,
    pub updated_at: DateTime<Utc>,
}
