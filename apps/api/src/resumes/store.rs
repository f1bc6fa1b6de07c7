//! Record store for analyzed resumes. Insert, list, get, delete — records
//! are never updated in place.

use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::resume::{ResumeAnalysis, ResumeRow, ResumeSummaryRow};

/// Inserts one analyzed resume and returns the stored row with its
/// store-assigned id and upload timestamp.
pub async fn insert(
    pool: &PgPool,
    file_name: &str,
    raw_text: &str,
    analysis: ResumeAnalysis,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (file_name, name, email, phone, linkedin, github, address,
             core_skills, soft_skills, education, work_experience, projects,
             certifications, languages_known, hobbies,
             resume_rating, improvement_areas, upskill_suggestions, raw_text)
        VALUES
            ($1, $2, $3, $4, $5, $6, $7,
             $8, $9, $10, $11, $12,
             $13, $14, $15,
             $16, $17, $18, $19)
        RETURNING *
        "#,
    )
    .bind(file_name)
    .bind(&analysis.name)
    .bind(&analysis.email)
    .bind(&analysis.phone)
    .bind(&analysis.linkedin)
    .bind(&analysis.github)
    .bind(&analysis.address)
    .bind(Json(&analysis.core_skills))
    .bind(Json(&analysis.soft_skills))
    .bind(Json(&analysis.education))
    .bind(Json(&analysis.work_experience))
    .bind(Json(&analysis.projects))
    .bind(Json(&analysis.certifications))
    .bind(Json(&analysis.languages_known))
    .bind(Json(&analysis.hobbies))
    .bind(&analysis.resume_rating)
    .bind(Json(&analysis.improvement_areas))
    .bind(Json(&analysis.upskill_suggestions))
    .bind(raw_text)
    .fetch_one(pool)
    .await
}

/// Lists summary rows for every stored resume, oldest first.
pub async fn list(pool: &PgPool) -> Result<Vec<ResumeSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeSummaryRow>(
        "SELECT id, name, email, phone, file_name, upload_date FROM resumes ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

/// Fetches the full record for `id`, or `None` if it does not exist.
pub async fn get(pool: &PgPool, id: i32) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Deletes the record for `id`. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
