use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::engine::{self, select_backend};
use crate::analysis::progress::{apply_step_update, compute_overall_progress, StepProgressUpdate};
use crate::errors::AppError;
use crate::models::analysis::{
    AnalysisRequest, AnalysisResult, ExperienceLevel, Roadmap, ResumeAnalysisRow,
};
use crate::state::AppState;
use crate::storage;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub job_role: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analysis: AnalysisResult,
    pub roadmap: Roadmap,
    pub metadata: AnalysisMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub file_name: String,
    pub job_role: String,
    pub experience_level: String,
    pub created_at: DateTime<Utc>,
}

/// POST /api/v1/resume/analyze
///
/// Validates the request, runs the analysis and roadmap engines, uploads
/// the text artifact, persists the record, and returns the full result.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<AnalyzeResponse>), AppError> {
    if req.file_name.trim().is_empty() {
        return Err(AppError::MissingField("fileName"));
    }
    if req.experience_level.trim().is_empty() {
        return Err(AppError::MissingField("experienceLevel"));
    }
    let experience_level = ExperienceLevel::parse(&req.experience_level).ok_or_else(|| {
        AppError::Validation(
            "experienceLevel must be one of: intern, entry, mid, senior".to_string(),
        )
    })?;

    tracing::info!(
        "Received resume text: file={}, size={:?}, length={}, role={}, level={}",
        req.file_name,
        req.file_size,
        req.resume_text.len(),
        req.job_role,
        req.experience_level
    );

    let request = AnalysisRequest {
        resume_text: req.resume_text,
        job_role: req.job_role,
        experience_level,
        job_description: req
            .job_description
            .filter(|jd| !jd.trim().is_empty()),
    };

    let backend = select_backend(state.config.use_mock_ai, state.provider.as_ref());
    let analysis = engine::run_analysis(backend, &request).await?;

    // Keep the validated text as a plain-text artifact for record-keeping.
    let artifact = storage::upload_resume_text(
        &state.s3,
        &state.config.s3_bucket,
        &state.config.s3_endpoint,
        req.user_id,
        &req.file_name,
        &request.resume_text,
    )
    .await?;

    let roadmap = engine::run_roadmap(
        backend,
        &analysis.missing_skills,
        &request.job_role,
        request.experience_level,
        &analysis.skills_found,
    )
    .await;

    let id = Uuid::new_v4();
    let now = Utc::now();
    let analysis_doc = serde_json::to_value(&analysis)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing analysis: {e}")))?;
    let roadmap_doc = serde_json::to_value(&roadmap)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing roadmap: {e}")))?;

    sqlx::query(
        r#"
        INSERT INTO resume_analyses
            (id, user_id, file_name, resume_url, storage_key, job_role,
             experience_level, job_description, analysis, roadmap,
             overall_progress, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(id)
    .bind(req.user_id)
    .bind(&req.file_name)
    .bind(&artifact.url)
    .bind(&artifact.key)
    .bind(&request.job_role)
    .bind(request.experience_level.as_str())
    .bind(&request.job_description)
    .bind(&analysis_doc)
    .bind(&roadmap_doc)
    .bind(roadmap.overall_progress as i32)
    .bind(now)
    .bind(now)
    .execute(&state.db)
    .await?;

    tracing::info!("Analysis {id} complete for user {}", req.user_id);

    Ok((
        StatusCode::CREATED,
        Json(AnalyzeResponse {
            analysis_id: id,
            analysis,
            roadmap,
            metadata: AnalysisMetadata {
                file_name: req.file_name,
                job_role: request.job_role,
                experience_level: request.experience_level.as_str().to_string(),
                created_at: now,
            },
        }),
    ))
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/resume
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeAnalysisRow>>, AppError> {
    let rows: Vec<ResumeAnalysisRow> = sqlx::query_as(
        "SELECT * FROM resume_analyses WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.user_id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(rows))
}

/// GET /api/v1/resume/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeAnalysisRow>, AppError> {
    let row: Option<ResumeAnalysisRow> =
        sqlx::query_as("SELECT * FROM resume_analyses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(params.user_id)
            .fetch_optional(&state.db)
            .await?;

    row.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgressRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub update: StepProgressUpdate,
}

/// PATCH /api/v1/resume/:id/steps/:step
///
/// Applies a progress update to one roadmap step and recomputes the overall
/// progress. A single-row update; repeating the same update is a no-op.
pub async fn handle_step_progress(
    State(state): State<AppState>,
    Path((id, step_number)): Path<(Uuid, u32)>,
    Json(req): Json<StepProgressRequest>,
) -> Result<Json<Roadmap>, AppError> {
    let row: Option<ResumeAnalysisRow> =
        sqlx::query_as("SELECT * FROM resume_analyses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(req.user_id)
            .fetch_optional(&state.db)
            .await?;
    let row = row.ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    let mut roadmap: Roadmap = serde_json::from_value(row.roadmap)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored roadmap is malformed: {e}")))?;

    let step = roadmap
        .steps
        .iter_mut()
        .find(|s| s.step_number == step_number)
        .ok_or_else(|| AppError::NotFound(format!("Step {step_number} not found")))?;

    apply_step_update(step, &req.update, Utc::now())?;
    roadmap.overall_progress = compute_overall_progress(&roadmap.steps);

    let roadmap_doc = serde_json::to_value(&roadmap)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing roadmap: {e}")))?;

    sqlx::query(
        "UPDATE resume_analyses SET roadmap = $1, overall_progress = $2, updated_at = $3
         WHERE id = $4 AND user_id = $5",
    )
    .bind(&roadmap_doc)
    .bind(roadmap.overall_progress as i32)
    .bind(Utc::now())
    .bind(id)
    .bind(req.user_id)
    .execute(&state.db)
    .await?;

    Ok(Json(roadmap))
}
