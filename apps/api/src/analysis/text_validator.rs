//! Text Validator — quality gate on extracted resume text, run before any
//! provider call. Pure function over its input string.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const MIN_TEXT_LENGTH: usize = 50;
const MAX_TEXT_LENGTH: usize = 100_000;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d{10,}").expect("valid regex"));
static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)experience|education|skills|projects").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextValidationError {
    #[error("Resume text is empty. Please ensure the file was parsed correctly.")]
    EmptyInput,

    #[error("Resume text is too short (minimum {MIN_TEXT_LENGTH} characters). Please ensure the file contains actual content.")]
    TooShort,

    #[error("Resume text is too long (maximum {MAX_TEXT_LENGTH} characters). Please use a shorter resume.")]
    TooLong,
}

/// Outcome of a successful validation. The warning is non-fatal and never
/// blocks downstream processing.
#[derive(Debug, Clone)]
pub struct TextReport {
    pub text_length: usize,
    pub warning: Option<String>,
}

/// Validates extracted resume text.
///
/// Fails on empty input, trimmed length < 50, or trimmed length > 100,000.
/// Otherwise valid; additionally warns when the text contains none of an
/// email-like pattern, a phone-like digit run, or a standard section keyword.
pub fn validate_resume_text(text: &str) -> Result<TextReport, TextValidationError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(TextValidationError::EmptyInput);
    }
    if trimmed.chars().count() < MIN_TEXT_LENGTH {
        return Err(TextValidationError::TooShort);
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(TextValidationError::TooLong);
    }

    let has_email = EMAIL_RE.is_match(trimmed);
    let has_phone = PHONE_RE.is_match(trimmed);
    let has_sections = SECTION_RE.is_match(trimmed);

    let warning = if !has_email && !has_phone && !has_sections {
        Some(
            "Resume may be missing standard sections (contact info, experience, skills, etc.)"
                .to_string(),
        )
    } else {
        None
    };

    Ok(TextReport {
        text_length: trimmed.chars().count(),
        warning,
    })
}
