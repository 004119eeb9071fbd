//! AI Provider Adapter — translates domain requests into single Gemini
//! calls and sanitizes the untyped responses into canonical domain values.
//!
//! The provider response is treated as an untrusted document: scores are
//! clamped with defaults, expected sequences are coerced to empty when
//! absent or mistyped, and malformed elements are dropped rather than
//! trusted. Shape mismatches surface as `LlmError::Schema`, which the
//! engines recover from by switching to the fallback generator.

use serde_json::Value;
use tracing::debug;

use crate::analysis::prompts;
use crate::llm_client::{GeminiClient, LlmError};
use crate::models::analysis::{
    AnalysisRequest, AnalysisResult, Resource, RoadmapDraft, StepDraft, Suggestion,
};

const DEFAULT_MATCH_PERCENT: u8 = 50;
const DEFAULT_ATS_SCORE: u8 = 70;
const DEFAULT_TOTAL_DURATION: &str = "3-6 months";

/// Analyzes a resume via the provider. One call, no retry.
pub async fn analyze_resume(
    client: &GeminiClient,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, LlmError> {
    let prompt = prompts::analysis_prompt(request);
    debug!("Requesting provider analysis for role '{}'", request.job_role);

    let value = client.generate_value(&prompt).await?;
    if !value.is_object() {
        return Err(LlmError::Schema(
            "analysis response is not a JSON object".to_string(),
        ));
    }
    Ok(sanitize_analysis(&value))
}

/// Generates a roadmap draft via the provider. One call, no retry.
/// Requires a `steps` array in the response.
pub async fn generate_roadmap(
    client: &GeminiClient,
    missing_skills: &[String],
    job_role: &str,
    experience_level: &str,
    existing_skills: &[String],
) -> Result<RoadmapDraft, LlmError> {
    let prompt = prompts::roadmap_prompt(missing_skills, job_role, experience_level, existing_skills);
    debug!("Requesting provider roadmap for role '{job_role}'");

    let value = client.generate_value(&prompt).await?;
    sanitize_roadmap(&value)
}

/// Builds a canonical `AnalysisResult` from an untyped provider response.
pub fn sanitize_analysis(value: &Value) -> AnalysisResult {
    AnalysisResult {
        match_percent: clamp_score(value.get("matchPercent"), DEFAULT_MATCH_PERCENT),
        ats_score: clamp_score(value.get("atsScore"), DEFAULT_ATS_SCORE),
        skills_found: string_seq(value.get("skillsFound")),
        missing_skills: string_seq(value.get("missingSkills")),
        suggestions: typed_seq::<Suggestion>(value.get("suggestions")),
        strength_areas: string_seq(value.get("strengthAreas")),
        improvement_areas: string_seq(value.get("improvementAreas")),
    }
}

/// Builds a `RoadmapDraft` from an untyped provider response.
/// Fails when `steps` is absent or not an array.
pub fn sanitize_roadmap(value: &Value) -> Result<RoadmapDraft, LlmError> {
    let steps = value
        .get("steps")
        .and_then(Value::as_array)
        .ok_or_else(|| LlmError::Schema("roadmap response missing steps array".to_string()))?;

    let total_estimated_duration = value
        .get("totalEstimatedDuration")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_TOTAL_DURATION)
        .to_string();

    Ok(RoadmapDraft {
        total_estimated_duration,
        steps: steps
            .iter()
            .enumerate()
            .map(|(i, step)| sanitize_step(i, step))
            .collect(),
    })
}

fn sanitize_step(index: usize, value: &Value) -> StepDraft {
    StepDraft {
        title: value
            .get("title")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("Step {}", index + 1)),
        description: value
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        estimated_duration: value
            .get("estimatedDuration")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("1 week")
            .to_string(),
        skills: string_seq(value.get("skills")),
        resources: typed_seq::<Resource>(value.get("resources")),
    }
}

/// Clamps a numeric score into [0, 100]; missing or non-numeric values get
/// the default.
fn clamp_score(value: Option<&Value>, default: u8) -> u8 {
    value
        .and_then(Value::as_f64)
        .map(|n| n.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(default)
}

/// Coerces an expected string sequence: non-arrays become empty, non-string
/// elements are dropped.
fn string_seq(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Coerces an expected typed sequence, dropping elements that do not parse.
fn typed_seq<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_analysis_clamps_scores() {
        let value = json!({"matchPercent": 150, "atsScore": -20});
        let result = sanitize_analysis(&value);
        assert_eq!(result.match_percent, 100);
        assert_eq!(result.ats_score, 0);
    }

    #[test]
    fn test_sanitize_analysis_defaults_missing_scores() {
        let result = sanitize_analysis(&json!({}));
        assert_eq!(result.match_percent, 50);
        assert_eq!(result.ats_score, 70);
    }

    #[test]
    fn test_sanitize_analysis_defaults_non_numeric_scores() {
        let value = json!({"matchPercent": "eighty", "atsScore": null});
        let result = sanitize_analysis(&value);
        assert_eq!(result.match_percent, 50);
        assert_eq!(result.ats_score, 70);
    }

    #[test]
    fn test_sanitize_analysis_zero_score_is_kept() {
        let value = json!({"matchPercent": 0});
        assert_eq!(sanitize_analysis(&value).match_percent, 0);
    }

    #[test]
    fn test_sanitize_analysis_coerces_non_arrays_to_empty() {
        let value = json!({
            "skillsFound": "react",
            "missingSkills": {"a": 1},
            "suggestions": 42
        });
        let result = sanitize_analysis(&value);
        assert!(result.skills_found.is_empty());
        assert!(result.missing_skills.is_empty());
        assert!(result.suggestions.is_empty());
        assert!(result.strength_areas.is_empty());
        assert!(result.improvement_areas.is_empty());
    }

    #[test]
    fn test_sanitize_analysis_drops_non_string_elements() {
        let value = json!({"skillsFound": ["react", 7, null, "docker"]});
        assert_eq!(sanitize_analysis(&value).skills_found, vec!["react", "docker"]);
    }

    #[test]
    fn test_sanitize_analysis_parses_well_formed_suggestions() {
        let value = json!({
            "suggestions": [
                {
                    "category": "keywords",
                    "priority": "high",
                    "title": "Add GraphQL",
                    "description": "Mention GraphQL experience"
                },
                {"title": "malformed, no other fields"}
            ]
        });
        let result = sanitize_analysis(&value);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].title, "Add GraphQL");
    }

    #[test]
    fn test_sanitize_roadmap_requires_steps_array() {
        assert!(matches!(
            sanitize_roadmap(&json!({"totalEstimatedDuration": "2 months"})),
            Err(LlmError::Schema(_))
        ));
        assert!(matches!(
            sanitize_roadmap(&json!({"steps": "not an array"})),
            Err(LlmError::Schema(_))
        ));
    }

    #[test]
    fn test_sanitize_roadmap_defaults_total_duration() {
        let draft = sanitize_roadmap(&json!({"steps": []})).unwrap();
        assert_eq!(draft.total_estimated_duration, "3-6 months");
    }

    #[test]
    fn test_sanitize_step_fills_defaults() {
        let value = json!({"steps": [{}]});
        let draft = sanitize_roadmap(&value).unwrap();
        let step = &draft.steps[0];
        assert_eq!(step.title, "Step 1");
        assert_eq!(step.description, "");
        assert_eq!(step.estimated_duration, "1 week");
        assert!(step.skills.is_empty());
        assert!(step.resources.is_empty());
    }

    #[test]
    fn test_sanitize_step_parses_resources_and_null_urls() {
        let value = json!({"steps": [{
            "title": "Learn Docker",
            "resources": [
                {"type": "course", "title": "Docker Guide", "url": "https://www.udemy.com/", "provider": "Udemy"},
                {"type": "project", "title": "Build something", "url": null, "provider": "Self-guided"}
            ]
        }]});
        let draft = sanitize_roadmap(&value).unwrap();
        let resources = &draft.steps[0].resources;
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].url.as_deref(), Some("https://www.udemy.com/"));
        assert!(resources[1].url.is_none());
    }
}
