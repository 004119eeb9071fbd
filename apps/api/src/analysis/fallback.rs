//! Deterministic Fallback Generator — rule-based analyzer and roadmap
//! builder, structurally identical to the provider output but pure and
//! network-free. Used whenever the provider is disabled, unconfigured, or
//! fails, so a caller always receives a result.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::analysis::{
    AnalysisRequest, AnalysisResult, ExperienceLevel, Resource, ResourceType, RoadmapDraft,
    StepDraft, Suggestion, SuggestionCategory, SuggestionPriority,
};

const MAX_SKILLS_FOUND: usize = 8;
const MAX_MISSING_SKILLS: usize = 5;
const MAX_ROADMAP_STEPS: usize = 5;

/// Fixed vocabulary of known technology terms, matched on word boundaries.
static SKILL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(JavaScript|TypeScript|React|Node|Python|Java|AWS|Docker|SQL|MongoDB|Git|HTML|CSS|API|REST|GraphQL|Testing|CI/CD|Vue|Angular|Express|Django|Flask|Kubernetes|Redis|PostgreSQL|MySQL)\b",
    )
    .expect("valid regex")
});

/// Scans resume text for known technology terms. Lowercased, deduplicated,
/// first-seen order preserved.
pub fn extract_skills(resume_text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in SKILL_RE.find_iter(resume_text) {
        let skill = m.as_str().to_lowercase();
        if !found.contains(&skill) {
            found.push(skill);
        }
    }
    found
}

/// Skills commonly expected for a normalized job-role string. Unknown roles
/// get a small generic default list.
fn expected_skills_for_role(job_role: &str) -> &'static [&'static str] {
    match job_role.trim().to_lowercase().as_str() {
        "frontend developer" => &["TypeScript", "React", "GraphQL", "Testing", "Webpack"],
        "backend developer" => &["Docker", "PostgreSQL", "Redis", "Microservices"],
        "full stack developer" => &["TypeScript", "GraphQL", "Docker", "Testing", "CI/CD"],
        "data scientist" => &["TensorFlow", "Pandas", "Scikit-learn", "Statistics"],
        "devops engineer" => &["Kubernetes", "Terraform", "Jenkins", "Ansible"],
        _ => &["TypeScript", "Testing", "CI/CD"],
    }
}

/// Rule-based resume analysis. Deterministic for identical input.
pub fn analyze_resume(request: &AnalysisRequest) -> AnalysisResult {
    let found_skills = extract_skills(&request.resume_text);

    let missing_skills: Vec<String> = expected_skills_for_role(&request.job_role)
        .iter()
        .filter(|expected| {
            !found_skills
                .iter()
                .any(|found| found.eq_ignore_ascii_case(expected))
        })
        .take(MAX_MISSING_SKILLS)
        .map(|s| s.to_string())
        .collect();

    // Cap applied after the multiplication; the full found-skill count feeds
    // the formula even when the output list is truncated to 8.
    let match_percent = (50 + found_skills.len() * 5).min(95) as u8;
    let ats_score = (60 + request.resume_text.chars().count() / 100).min(90) as u8;

    let top_missing: Vec<&str> = missing_skills
        .iter()
        .take(3)
        .map(String::as_str)
        .collect();

    let suggestions = vec![
        Suggestion {
            category: SuggestionCategory::Keywords,
            priority: SuggestionPriority::High,
            title: "Add Missing Technologies".to_string(),
            description: format!(
                "Include {} in your skills section to better match {} requirements.",
                top_missing.join(", "),
                request.job_role
            ),
        },
        Suggestion {
            category: SuggestionCategory::Formatting,
            priority: SuggestionPriority::Medium,
            title: "Improve ATS Compatibility".to_string(),
            description: "Use standard section headers (Experience, Education, Skills) and avoid tables or complex formatting.".to_string(),
        },
        Suggestion {
            category: SuggestionCategory::Content,
            priority: SuggestionPriority::High,
            title: "Quantify Achievements".to_string(),
            description: "Add metrics and numbers to demonstrate impact (e.g., \"Improved performance by 40%\", \"Managed team of 5\").".to_string(),
        },
    ];

    let strength_areas = if found_skills.len() > 3 {
        vec!["Technical Skills".to_string(), "Relevant Experience".to_string()]
    } else {
        vec!["Relevant Experience".to_string()]
    };
    let improvement_areas = if missing_skills.is_empty() {
        vec!["Keyword Optimization".to_string()]
    } else {
        vec!["Technical Stack Coverage".to_string(), "Keyword Optimization".to_string()]
    };

    AnalysisResult {
        match_percent,
        ats_score,
        skills_found: found_skills.into_iter().take(MAX_SKILLS_FOUND).collect(),
        missing_skills,
        suggestions,
        strength_areas,
        improvement_areas,
    }
}

/// Rule-based roadmap: one "Master <skill>" step per missing skill, three
/// templated resources each.
pub fn generate_roadmap(
    missing_skills: &[String],
    job_role: &str,
    experience_level: ExperienceLevel,
) -> RoadmapDraft {
    let estimated_duration = if experience_level == ExperienceLevel::Entry {
        "3-4 weeks"
    } else {
        "2-3 weeks"
    };

    let steps: Vec<StepDraft> = missing_skills
        .iter()
        .take(MAX_ROADMAP_STEPS)
        .map(|skill| StepDraft {
            title: format!("Master {skill}"),
            description: format!(
                "Learn {skill} fundamentals and apply them to {job_role} projects. \
                 Build hands-on experience through practical exercises."
            ),
            estimated_duration: estimated_duration.to_string(),
            skills: vec![skill.clone()],
            resources: vec![
                Resource {
                    resource_type: ResourceType::Course,
                    title: format!("{skill} Complete Guide"),
                    url: Some(format!(
                        "https://www.udemy.com/topic/{}/",
                        skill.to_lowercase()
                    )),
                    provider: "Udemy".to_string(),
                },
                Resource {
                    resource_type: ResourceType::Documentation,
                    title: format!("Official {skill} Documentation"),
                    url: Some("https://developer.mozilla.org/".to_string()),
                    provider: "MDN".to_string(),
                },
                Resource {
                    resource_type: ResourceType::Project,
                    title: format!("Build a {job_role} Project with {skill}"),
                    url: None,
                    provider: "Self-guided".to_string(),
                },
            ],
        })
        .collect();

    // Per-step estimate midpoints: 3.5 weeks at entry level, 2.5 otherwise.
    // Tracked in half-weeks to keep the arithmetic integral.
    let half_weeks_per_step = if experience_level == ExperienceLevel::Entry {
        7
    } else {
        5
    };
    let total_half_weeks = steps.len() * half_weeks_per_step;
    let months = total_half_weeks.div_ceil(8);

    RoadmapDraft {
        total_estimated_duration: format!("{months}-{} months", months + 1),
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(resume_text: &str, job_role: &str, level: ExperienceLevel) -> AnalysisRequest {
        AnalysisRequest {
            resume_text: resume_text.to_string(),
            job_role: job_role.to_string(),
            experience_level: level,
            job_description: None,
        }
    }

    #[test]
    fn test_extract_skills_lowercases_and_dedupes_in_order() {
        let skills = extract_skills("React and Docker, more React, then docker and Python");
        assert_eq!(skills, vec!["react", "docker", "python"]);
    }

    #[test]
    fn test_extract_skills_respects_word_boundaries() {
        // "Java" must not match inside "JavaScript"
        let skills = extract_skills("JavaScript specialist");
        assert_eq!(skills, vec!["javascript"]);
    }

    #[test]
    fn test_extract_skills_matches_ci_cd() {
        assert_eq!(extract_skills("set up CI/CD pipelines"), vec!["ci/cd"]);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let req = request(
            "Experienced engineer with React, TypeScript and Docker",
            "Frontend Developer",
            ExperienceLevel::Mid,
        );
        let a = analyze_resume(&req);
        let b = analyze_resume(&req);
        assert_eq!(a.match_percent, b.match_percent);
        assert_eq!(a.ats_score, b.ats_score);
        assert_eq!(a.skills_found, b.skills_found);
    }

    #[test]
    fn test_frontend_role_missing_skills_exclude_found() {
        let req = request(
            "Built dashboards in React and TypeScript with thorough Testing",
            "Frontend Developer",
            ExperienceLevel::Mid,
        );
        let result = analyze_resume(&req);
        assert!(!result
            .missing_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case("react")));
        assert!(!result
            .missing_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case("typescript")));
        assert!(result
            .missing_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case("graphql")));
    }

    #[test]
    fn test_unknown_role_uses_generic_expected_skills() {
        let req = request(
            &"a".repeat(60),
            "Underwater Basket Weaver",
            ExperienceLevel::Entry,
        );
        let result = analyze_resume(&req);
        assert_eq!(result.missing_skills, vec!["TypeScript", "Testing", "CI/CD"]);
    }

    #[test]
    fn test_match_percent_formula_and_cap() {
        // No skills: 50. Two skills: 60.
        let none = analyze_resume(&request(&"a".repeat(60), "x", ExperienceLevel::Mid));
        assert_eq!(none.match_percent, 50);

        let two = analyze_resume(&request("React and Docker", "x", ExperienceLevel::Mid));
        assert_eq!(two.match_percent, 60);

        // Many skills saturate the 95 cap.
        let many = analyze_resume(&request(
            "JavaScript TypeScript React Node Python Java AWS Docker SQL MongoDB Git HTML",
            "x",
            ExperienceLevel::Mid,
        ));
        assert_eq!(many.match_percent, 95);
    }

    #[test]
    fn test_skills_found_output_capped_at_8() {
        let result = analyze_resume(&request(
            "JavaScript TypeScript React Node Python Java AWS Docker SQL MongoDB",
            "x",
            ExperienceLevel::Mid,
        ));
        assert_eq!(result.skills_found.len(), 8);
    }

    #[test]
    fn test_ats_score_floor_division_and_cap() {
        let short = analyze_resume(&request(&"a".repeat(250), "x", ExperienceLevel::Mid));
        assert_eq!(short.ats_score, 62);

        let long = analyze_resume(&request(&"a".repeat(10_000), "x", ExperienceLevel::Mid));
        assert_eq!(long.ats_score, 90);
    }

    #[test]
    fn test_exactly_three_suggestions_first_names_missing_skills() {
        let result = analyze_resume(&request(
            &"a".repeat(60),
            "Frontend Developer",
            ExperienceLevel::Mid,
        ));
        assert_eq!(result.suggestions.len(), 3);
        assert_eq!(result.suggestions[0].category, SuggestionCategory::Keywords);
        assert!(result.suggestions[0].description.contains("TypeScript"));
        assert!(result.suggestions[0].description.contains("Frontend Developer"));
    }

    #[test]
    fn test_strength_and_improvement_thresholds() {
        let sparse = analyze_resume(&request(&"a".repeat(60), "x", ExperienceLevel::Mid));
        assert_eq!(sparse.strength_areas, vec!["Relevant Experience"]);
        assert!(sparse
            .improvement_areas
            .contains(&"Technical Stack Coverage".to_string()));

        let rich = analyze_resume(&request(
            "React Docker Python AWS experience",
            "x",
            ExperienceLevel::Mid,
        ));
        assert!(rich.strength_areas.contains(&"Technical Skills".to_string()));
    }

    #[test]
    fn test_scores_always_in_range() {
        for text in ["", "React", &"b".repeat(500_000)] {
            let result = analyze_resume(&request(text, "x", ExperienceLevel::Senior));
            assert!(result.match_percent <= 100);
            assert!(result.ats_score <= 100);
        }
    }

    #[test]
    fn test_roadmap_one_step_per_missing_skill_capped_at_5() {
        let missing: Vec<String> = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let draft = generate_roadmap(&missing, "Backend Developer", ExperienceLevel::Mid);
        assert_eq!(draft.steps.len(), 5);
        assert_eq!(draft.steps[0].title, "Master A");
        assert_eq!(draft.steps[0].resources.len(), 3);
    }

    #[test]
    fn test_roadmap_duration_by_level() {
        let missing = vec!["GraphQL".to_string()];
        let entry = generate_roadmap(&missing, "x", ExperienceLevel::Entry);
        assert_eq!(entry.steps[0].estimated_duration, "3-4 weeks");

        let senior = generate_roadmap(&missing, "x", ExperienceLevel::Senior);
        assert_eq!(senior.steps[0].estimated_duration, "2-3 weeks");
    }

    #[test]
    fn test_roadmap_total_duration_entry_five_steps() {
        let missing: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
        // 5 steps * 3.5 weeks = 17.5 weeks -> ceil(17.5 / 4) = 5 months
        let draft = generate_roadmap(&missing, "x", ExperienceLevel::Entry);
        assert_eq!(draft.total_estimated_duration, "5-6 months");
    }

    #[test]
    fn test_roadmap_total_duration_mid_two_steps() {
        let missing: Vec<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();
        // 2 steps * 2.5 weeks = 5 weeks -> ceil(5 / 4) = 2 months
        let draft = generate_roadmap(&missing, "x", ExperienceLevel::Mid);
        assert_eq!(draft.total_estimated_duration, "2-3 months");
    }

    #[test]
    fn test_roadmap_empty_missing_skills() {
        let draft = generate_roadmap(&[], "x", ExperienceLevel::Mid);
        assert!(draft.steps.is_empty());
        assert_eq!(draft.total_estimated_duration, "0-1 months");
    }

    #[test]
    fn test_roadmap_resource_urls() {
        let draft = generate_roadmap(&["GraphQL".to_string()], "Frontend Developer", ExperienceLevel::Mid);
        let resources = &draft.steps[0].resources;
        assert_eq!(
            resources[0].url.as_deref(),
            Some("https://www.udemy.com/topic/graphql/")
        );
        assert_eq!(resources[2].url, None);
        assert_eq!(resources[2].provider, "Self-guided");
    }
}
