//! Domain data model for resume analysis and learning roadmaps.
//!
//! Wire casing follows the client contract: camelCase fields, lowercase
//! enum values, snake_case step statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Target experience level for an analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Intern,
    Entry,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "intern" => Some(Self::Intern),
            "entry" => Some(Self::Entry),
            "mid" => Some(Self::Mid),
            "senior" => Some(Self::Senior),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intern => "intern",
            Self::Entry => "entry",
            Self::Mid => "mid",
            Self::Senior => "senior",
        }
    }
}

/// Immutable input to the analysis engine, constructed once per request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_role: String,
    pub experience_level: ExperienceLevel,
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Formatting,
    Keywords,
    Content,
    Structure,
    #[serde(other)]
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    High,
    Low,
    #[serde(other)]
    Medium,
}

/// A single actionable resume improvement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub priority: SuggestionPriority,
    pub title: String,
    pub description: String,
}

/// Canonical analysis output. Scores are always clamped into [0, 100] and
/// sequence fields are always present, regardless of what the provider sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub match_percent: u8,
    pub ats_score: u8,
    pub skills_found: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Documentation,
    Project,
    Tutorial,
    Book,
    #[serde(other)]
    Course,
}

/// A learning resource attached to a roadmap step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub title: String,
    pub url: Option<String>,
    pub provider: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// One stage of a learning roadmap, with its own progress state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub step_number: u32,
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
    pub skills: Vec<String>,
    pub resources: Vec<Resource>,
    pub status: StepStatus,
    pub progress_percent: u8,
    pub notes: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// A step as produced by generation (provider or fallback), before
/// numbering and progress initialization.
#[derive(Debug, Clone)]
pub struct StepDraft {
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
    pub skills: Vec<String>,
    pub resources: Vec<Resource>,
}

/// A roadmap as produced by generation, before normalization.
#[derive(Debug, Clone)]
pub struct RoadmapDraft {
    pub total_estimated_duration: String,
    pub steps: Vec<StepDraft>,
}

impl RoadmapStep {
    /// Builds a step at its 1-based position with fresh progress state.
    /// Any numbering or progress the generator produced is discarded.
    pub fn from_draft(step_number: u32, draft: StepDraft) -> Self {
        RoadmapStep {
            step_number,
            title: draft.title,
            description: draft.description,
            estimated_duration: draft.estimated_duration,
            skills: draft.skills,
            resources: draft.resources,
            status: StepStatus::NotStarted,
            progress_percent: 0,
            notes: String::new(),
            started_at: None,
            completed_at: None,
        }
    }
}

/// Canonical roadmap. `overall_progress` is always recomputed from `steps`,
/// never stored independently of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub total_estimated_duration: String,
    pub steps: Vec<RoadmapStep>,
    pub overall_progress: u8,
}

/// Persisted analysis record. `analysis` and `roadmap` are jsonb columns
/// holding the canonical `AnalysisResult` / `Roadmap` documents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeAnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub resume_url: String,
    pub storage_key: String,
    pub job_role: String,
    pub experience_level: String,
    pub job_description: Option<String>,
    pub analysis: Value,
    pub roadmap: Value,
    pub overall_progress: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_level_parse_known_values() {
        assert_eq!(ExperienceLevel::parse("entry"), Some(ExperienceLevel::Entry));
        assert_eq!(ExperienceLevel::parse("SENIOR"), Some(ExperienceLevel::Senior));
        assert_eq!(ExperienceLevel::parse(" mid "), Some(ExperienceLevel::Mid));
        assert_eq!(ExperienceLevel::parse("principal"), None);
    }

    #[test]
    fn test_experience_level_serde_lowercase() {
        let level: ExperienceLevel = serde_json::from_str(r#""intern""#).unwrap();
        assert_eq!(level, ExperienceLevel::Intern);
        assert_eq!(serde_json::to_string(&level).unwrap(), r#""intern""#);
    }

    #[test]
    fn test_step_status_serde_snake_case() {
        let status: StepStatus = serde_json::from_str(r#""not_started""#).unwrap();
        assert_eq!(status, StepStatus::NotStarted);
        assert_eq!(
            serde_json::to_string(&StepStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
    }

    #[test]
    fn test_unknown_suggestion_category_falls_back_to_general() {
        let category: SuggestionCategory = serde_json::from_str(r#""tone""#).unwrap();
        assert_eq!(category, SuggestionCategory::General);
    }

    #[test]
    fn test_unknown_priority_falls_back_to_medium() {
        let priority: SuggestionPriority = serde_json::from_str(r#""urgent""#).unwrap();
        assert_eq!(priority, SuggestionPriority::Medium);
    }

    #[test]
    fn test_step_from_draft_resets_progress_state() {
        let draft = StepDraft {
            title: "Master GraphQL".to_string(),
            description: "Learn GraphQL fundamentals".to_string(),
            estimated_duration: "2-3 weeks".to_string(),
            skills: vec!["graphql".to_string()],
            resources: vec![],
        };
        let step = RoadmapStep::from_draft(3, draft);
        assert_eq!(step.step_number, 3);
        assert_eq!(step.status, StepStatus::NotStarted);
        assert_eq!(step.progress_percent, 0);
        assert!(step.notes.is_empty());
        assert!(step.started_at.is_none());
        assert!(step.completed_at.is_none());
    }

    #[test]
    fn test_analysis_result_serializes_camel_case() {
        let result = AnalysisResult {
            match_percent: 80,
            ats_score: 75,
            skills_found: vec!["react".to_string()],
            missing_skills: vec![],
            suggestions: vec![],
            strength_areas: vec![],
            improvement_areas: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["matchPercent"], 80);
        assert_eq!(json["atsScore"], 75);
        assert!(json["skillsFound"].is_array());
    }

    #[test]
    fn test_roadmap_step_serializes_camel_case() {
        let step = RoadmapStep::from_draft(
            1,
            StepDraft {
                title: "Master Docker".to_string(),
                description: String::new(),
                estimated_duration: "2-3 weeks".to_string(),
                skills: vec![],
                resources: vec![],
            },
        );
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["stepNumber"], 1);
        assert_eq!(json["status"], "not_started");
        assert_eq!(json["progressPercent"], 0);
        assert!(json["startedAt"].is_null());
    }
}
