use std::path::{Path as FsPath, PathBuf};

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::analysis::analyze_resume;
use crate::errors::AppError;
use crate::extract::{extract_text, is_supported_filename};
use crate::models::resume::{ResumeRow, ResumeSummaryRow};
use crate::resumes::store;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub file_name: String,
    pub upload_date: chrono::DateTime<chrono::Utc>,
}

impl From<ResumeSummaryRow> for ResumeSummary {
    fn from(row: ResumeSummaryRow) -> Self {
        Self {
            id: row.id,
            name: or_unknown(row.name),
            email: or_unknown(row.email),
            phone: or_unknown(row.phone),
            file_name: row.file_name,
            upload_date: row.upload_date,
        }
    }
}

fn or_unknown(value: String) -> String {
    if value.is_empty() {
        "Unknown".to_string()
    } else {
        value
    }
}

/// POST /api/upload_resume
///
/// Accepts one multipart `file` field, stages it to the upload directory,
/// extracts its text, runs analysis, and persists the result. Unsupported
/// types and unextractable files are rejected before the model is ever
/// called; a failed model call still persists a record with the default
/// analysis. The staged file is removed on every failure path after staging.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeRow>, AppError> {
    let (file_name, data) = read_file_field(multipart).await?;

    if !is_supported_filename(&file_name) {
        return Err(AppError::Validation(
            "Only PDF and DOCX files are supported".to_string(),
        ));
    }
    // Suffix check above guarantees an extension is present.
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let staged_path = stage_upload(&state.config.upload_dir, &extension, &data)
        .await
        .map_err(AppError::Internal)?;

    let raw_text = match run_extraction(staged_path.clone(), extension).await {
        Ok(text) => text,
        Err(err) => {
            discard_staged(&staged_path).await;
            return Err(err);
        }
    };

    let analysis = analyze_resume(&raw_text, &state.llm).await.into_analysis();

    match store::insert(&state.db, &file_name, &raw_text, analysis).await {
        Ok(row) => Ok(Json(row)),
        Err(e) => {
            discard_staged(&staged_path).await;
            Err(e.into())
        }
    }
}

/// GET /api/resumes
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let rows = store::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(ResumeSummary::from).collect()))
}

/// GET /api/resume/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ResumeRow>, AppError> {
    let row = store::get(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;
    Ok(Json(row))
}

/// DELETE /api/resume/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = store::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Resume not found".to_string()));
    }
    Ok(Json(json!({"message": "Resume deleted successfully"})))
}

/// Pulls the `file` field (name and content) out of the multipart body.
async fn read_file_field(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File field has no filename".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        return Ok((file_name, data));
    }

    Err(AppError::Validation(
        "Multipart body has no 'file' field".to_string(),
    ))
}

/// Writes the upload under a fresh UUID name inside the staging directory.
async fn stage_upload(upload_dir: &str, extension: &str, data: &[u8]) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(upload_dir).await?;
    let staged_path = FsPath::new(upload_dir).join(format!("{}.{extension}", Uuid::new_v4()));
    tokio::fs::write(&staged_path, data).await?;
    Ok(staged_path)
}

/// Runs the blocking extraction off the async runtime.
async fn run_extraction(path: PathBuf, extension: String) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || extract_text(&path, &extension))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?;

    extracted.map_err(|e| AppError::Validation(e.to_string()))
}

async fn discard_staged(path: &FsPath) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!("Failed to remove staged file {}: {e}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_fields_render_as_unknown() {
        let row = ResumeSummaryRow {
            id: 1,
            name: String::new(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            file_name: "resume.pdf".to_string(),
            upload_date: chrono::Utc::now(),
        };
        let summary = ResumeSummary::from(row);
        assert_eq!(summary.name, "Unknown");
        assert_eq!(summary.email, "ada@example.com");
        assert_eq!(summary.phone, "Unknown");
    }

    #[tokio::test]
    async fn staged_uploads_land_in_the_staging_dir_with_uuid_names() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("uploads");

        let path = stage_upload(staging.to_str().unwrap(), "pdf", b"%PDF-1.4")
            .await
            .unwrap();

        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn failed_extraction_path_leaves_no_staged_file() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("uploads");

        let path = stage_upload(staging.to_str().unwrap(), "pdf", b"not a pdf")
            .await
            .unwrap();
        let result = run_extraction(path.clone(), "pdf".to_string()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        discard_staged(&path).await;
        assert!(!path.exists());
    }
}
