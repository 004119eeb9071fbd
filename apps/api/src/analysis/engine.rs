//! Analysis and Roadmap Engines — orchestrate validation, backend
//! selection, provider calls, fallback recovery, and roadmap normalization.
//!
//! Provider-class failures (`LlmError`) are absorbed here: once input
//! validation passes, a structurally valid result is always produced, even
//! under total provider unavailability. Programmer errors are never masked
//! as provider failures.

use tracing::{info, warn};

use crate::analysis::progress::compute_overall_progress;
use crate::analysis::text_validator::validate_resume_text;
use crate::analysis::{fallback, provider};
use crate::errors::AppError;
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::analysis::{
    AnalysisRequest, AnalysisResult, ExperienceLevel, Roadmap, RoadmapDraft, RoadmapStep,
};

/// The generation backend chosen for one request. Selected once per call,
/// never retried.
#[derive(Clone, Copy)]
pub enum Backend<'a> {
    Provider(&'a GeminiClient),
    Fallback,
}

/// Picks the backend: the provider is active only when mock mode is off and
/// a client (i.e. a credential) exists. Everything else routes to the
/// deterministic fallback generator.
pub fn select_backend(use_mock_ai: bool, client: Option<&GeminiClient>) -> Backend<'_> {
    match client {
        Some(client) if !use_mock_ai => Backend::Provider(client),
        _ => Backend::Fallback,
    }
}

/// Runs a full resume analysis: field validation, text validation, then
/// provider-or-fallback generation.
pub async fn run_analysis(
    backend: Backend<'_>,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::MissingField("resumeText"));
    }
    if request.job_role.trim().is_empty() {
        return Err(AppError::MissingField("jobRole"));
    }

    let report = validate_resume_text(&request.resume_text)
        .map_err(|e| AppError::InvalidResumeText(e.to_string()))?;
    if let Some(warning) = &report.warning {
        warn!("Resume text warning: {warning}");
    }

    let analysis = match backend {
        Backend::Provider(client) => {
            recover_analysis(provider::analyze_resume(client, request).await, request)
        }
        Backend::Fallback => {
            info!("Using deterministic fallback analysis");
            fallback::analyze_resume(request)
        }
    };

    Ok(analysis)
}

/// Generates a roadmap and normalizes it: steps are renumbered to their
/// 1-based sequence position and progress state is freshly initialized,
/// regardless of what the generator produced.
pub async fn run_roadmap(
    backend: Backend<'_>,
    missing_skills: &[String],
    job_role: &str,
    experience_level: ExperienceLevel,
    existing_skills: &[String],
) -> Roadmap {
    let draft = match backend {
        Backend::Provider(client) => recover_roadmap(
            provider::generate_roadmap(
                client,
                missing_skills,
                job_role,
                experience_level.as_str(),
                existing_skills,
            )
            .await,
            missing_skills,
            job_role,
            experience_level,
        ),
        Backend::Fallback => {
            info!("Using deterministic fallback roadmap");
            fallback::generate_roadmap(missing_skills, job_role, experience_level)
        }
    };

    normalize_roadmap(draft)
}

/// Recovers from a failed provider analysis by switching to the fallback.
fn recover_analysis(
    result: Result<AnalysisResult, LlmError>,
    request: &AnalysisRequest,
) -> AnalysisResult {
    match result {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!("Provider analysis failed, falling back: {e}");
            fallback::analyze_resume(request)
        }
    }
}

/// Recovers from a failed provider roadmap by switching to the fallback.
fn recover_roadmap(
    result: Result<RoadmapDraft, LlmError>,
    missing_skills: &[String],
    job_role: &str,
    experience_level: ExperienceLevel,
) -> RoadmapDraft {
    match result {
        Ok(draft) => draft,
        Err(e) => {
            warn!("Provider roadmap failed, falling back: {e}");
            fallback::generate_roadmap(missing_skills, job_role, experience_level)
        }
    }
}

/// Turns a draft into the canonical roadmap: contiguous 1-based numbering,
/// fresh progress fields, derived overall progress.
pub fn normalize_roadmap(draft: RoadmapDraft) -> Roadmap {
    let steps: Vec<RoadmapStep> = draft
        .steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| RoadmapStep::from_draft(i as u32 + 1, step))
        .collect();

    let overall_progress = compute_overall_progress(&steps);

    Roadmap {
        total_estimated_duration: draft.total_estimated_duration,
        steps,
        overall_progress,
    }
}
