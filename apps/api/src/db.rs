use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS resumes (
        id                 UUID PRIMARY KEY,
        user_id            UUID NOT NULL,
        original_filename  TEXT NOT NULL,
        stored_path        TEXT NOT NULL,
        size_bytes         BIGINT NOT NULL,
        raw_text           TEXT NOT NULL DEFAULT '',
        skills             TEXT[] NOT NULL DEFAULT '{}',
        summary            TEXT NOT NULL DEFAULT '',
        extraction_warning TEXT,
        created_at         TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS resumes_user_id_idx ON resumes (user_id, created_at DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS profile_skills (
        user_id    UUID PRIMARY KEY,
        skills     TEXT[] NOT NULL DEFAULT '{}',
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the service's tables if they do not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema is up to date");
    Ok(())
}
