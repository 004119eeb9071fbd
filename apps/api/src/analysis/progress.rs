//! Progress Tracker — aggregate completion math and the roadmap-step state
//! machine. Pure functions, safe to call concurrently.
//!
//! Step invariants maintained here:
//! - `not_started` ⇒ `progress_percent == 0` and `started_at == None`
//! - `completed` ⇒ `progress_percent == 100` and `completed_at != None`

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::analysis::{RoadmapStep, StepStatus};

/// Average of all steps' progress, rounded to the nearest integer.
/// Returns 0 for an empty sequence. Order-independent.
pub fn compute_overall_progress(steps: &[RoadmapStep]) -> u8 {
    if steps.is_empty() {
        return 0;
    }
    let sum: u32 = steps.iter().map(|s| s.progress_percent as u32).sum();
    ((sum as f64 / steps.len() as f64).round()) as u8
}

/// Legal step-status transitions. Staying in the current status is always
/// allowed; a completed step can be reopened, an in-progress step reset.
pub fn can_transition(from: StepStatus, to: StepStatus) -> bool {
    use StepStatus::*;
    matches!(
        (from, to),
        (NotStarted, NotStarted)
            | (NotStarted, InProgress)
            | (InProgress, InProgress)
            | (InProgress, Completed)
            | (InProgress, NotStarted)
            | (Completed, Completed)
            | (Completed, InProgress)
    )
}

/// A partial progress update for one step. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgressUpdate {
    pub status: Option<StepStatus>,
    pub progress_percent: Option<u8>,
    pub notes: Option<String>,
}

/// Applies a progress update to a step, enforcing the transition rules and
/// the status/progress invariants.
///
/// When no explicit status is given, one is inferred from the percentage:
/// 100 implies completion, any other value on a fresh step implies
/// in-progress.
pub fn apply_step_update(
    step: &mut RoadmapStep,
    update: &StepProgressUpdate,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if let Some(percent) = update.progress_percent {
        if percent > 100 {
            return Err(AppError::Validation(
                "progressPercent must be between 0 and 100".to_string(),
            ));
        }
    }

    let target = match (update.status, update.progress_percent) {
        (Some(status), _) => status,
        (None, Some(100)) => StepStatus::Completed,
        (None, Some(_)) if step.status == StepStatus::NotStarted => StepStatus::InProgress,
        (None, _) => step.status,
    };

    if !can_transition(step.status, target) {
        return Err(AppError::InvalidTransition(format!(
            "step {} cannot move from {:?} to {:?}",
            step.step_number, step.status, target
        )));
    }

    match target {
        StepStatus::NotStarted => {
            step.progress_percent = 0;
            step.started_at = None;
            step.completed_at = None;
        }
        StepStatus::InProgress => {
            if let Some(percent) = update.progress_percent {
                step.progress_percent = percent;
            }
            step.started_at = step.started_at.or(Some(now));
            step.completed_at = None;
        }
        StepStatus::Completed => {
            step.progress_percent = 100;
            step.started_at = step.started_at.or(Some(now));
            step.completed_at = step.completed_at.or(Some(now));
        }
    }
    step.status = target;

    if let Some(notes) = &update.notes {
        step.notes = notes.clone();
    }

    Ok(())
}
