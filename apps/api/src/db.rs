use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

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

/// Creates the `resumes` table on startup if it does not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resumes (
            id                  SERIAL PRIMARY KEY,
            file_name           TEXT NOT NULL,
            upload_date         TIMESTAMPTZ NOT NULL DEFAULT now(),
            name                TEXT NOT NULL DEFAULT '',
            email               TEXT NOT NULL DEFAULT '',
            phone               TEXT NOT NULL DEFAULT '',
            linkedin            TEXT NOT NULL DEFAULT '',
            github              TEXT NOT NULL DEFAULT '',
            address             TEXT NOT NULL DEFAULT '',
            core_skills         JSONB NOT NULL DEFAULT '[]',
            soft_skills         JSONB NOT NULL DEFAULT '[]',
            education           JSONB NOT NULL DEFAULT '[]',
            work_experience     JSONB NOT NULL DEFAULT '[]',
            projects            JSONB NOT NULL DEFAULT '[]',
            certifications      JSONB NOT NULL DEFAULT '[]',
            languages_known     JSONB NOT NULL DEFAULT '[]',
            hobbies             JSONB NOT NULL DEFAULT '[]',
            resume_rating       TEXT NOT NULL DEFAULT '0/10',
            improvement_areas   JSONB NOT NULL DEFAULT '[]',
            upskill_suggestions JSONB NOT NULL DEFAULT '[]',
            raw_text            TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema ensured");
    Ok(())
}
