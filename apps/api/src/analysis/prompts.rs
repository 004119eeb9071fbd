// All LLM prompt constants for resume analysis and roadmap generation.
// Templates use `{placeholder}` replacement; both demand a single JSON
// object with an exact schema — no prose, no markdown fences.

use crate::models::analysis::AnalysisRequest;

/// Analysis prompt template. Replace `{experience_level}`, `{job_role}`,
/// `{resume_text}`, `{job_description_section}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert resume analyzer and career advisor. Analyze the following resume for a {experience_level}-level {job_role} position.

**Resume Content:**
{resume_text}

{job_description_section}**Your Task:**
Provide a comprehensive analysis in the following JSON format (respond ONLY with valid JSON, no markdown):

{
  "matchPercent": <number between 0-100>,
  "atsScore": <number between 0-100>,
  "skillsFound": ["skill1", "skill2", ...],
  "missingSkills": ["skill1", "skill2", ...],
  "suggestions": [
    {
      "category": "<formatting|keywords|content|structure|general>",
      "priority": "<high|medium|low>",
      "title": "<short title>",
      "description": "<detailed suggestion>"
    }
  ],
  "strengthAreas": ["area1", "area2", ...],
  "improvementAreas": ["area1", "area2", ...]
}

**Guidelines:**
- matchPercent: How well the resume matches the job requirements (0-100)
- atsScore: ATS (Applicant Tracking System) compatibility score (0-100)
- skillsFound: Technical and soft skills present in the resume relevant to the role
- missingSkills: Critical skills for the role that are missing from the resume
- suggestions: Actionable improvements categorized by type and priority
- strengthAreas: What the candidate excels at based on the resume
- improvementAreas: Areas needing improvement for the target role

Be specific, actionable, and constructive. Focus on skills relevant to {job_role}."#;

/// Roadmap prompt template. Replace `{experience_level}`, `{job_role}`,
/// `{existing_skills}`, `{missing_skills}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and learning path designer. Create a personalized learning roadmap for a {experience_level}-level professional targeting a {job_role} position.

**Current Skills:**
{existing_skills}

**Skills to Learn:**
{missing_skills}

**Your Task:**
Create a structured learning roadmap in the following JSON format (respond ONLY with valid JSON, no markdown):

{
  "totalEstimatedDuration": "<total time estimate, e.g., '3-6 months'>",
  "steps": [
    {
      "stepNumber": 1,
      "title": "<step title>",
      "description": "<detailed description of what to learn and why>",
      "estimatedDuration": "<e.g., '2 weeks', '1 month'>",
      "skills": ["skill1", "skill2"],
      "resources": [
        {
          "type": "<course|documentation|project|tutorial|book>",
          "title": "<resource title>",
          "url": "<REAL resource URL - must be valid and working>",
          "provider": "<provider name, e.g., Udemy, Coursera, MDN, YouTube, freeCodeCamp>"
        }
      ]
    }
  ]
}

**Guidelines:**
1. Progressive structure: start with fundamentals, move through practical
   application, end with advanced, production-ready topics. Each step must
   build on the previous one.
2. Resources: 2-4 per step, mixing video tutorials, official documentation,
   and at least one hands-on project. ONLY reference resources that actually
   exist on real platforms (YouTube, Udemy, Coursera, freeCodeCamp, MDN,
   official docs). If unsure of an exact URL, use the platform's main domain
   instead of inventing one.
3. Time estimates: entry-level learners need 2-4 weeks per step; mid-level
   1-3 weeks; senior 1-2 weeks.

Every URL must be real and accessible. Never invent course names or links."#;

/// Fills the analysis template from a request.
pub fn analysis_prompt(request: &AnalysisRequest) -> String {
    let job_description_section = match request.job_description.as_deref() {
        Some(jd) if !jd.trim().is_empty() => format!("**Job Description:**\n{jd}\n\n"),
        _ => String::new(),
    };

    ANALYSIS_PROMPT_TEMPLATE
        .replace("{experience_level}", request.experience_level.as_str())
        .replace("{job_role}", &request.job_role)
        .replace("{resume_text}", &request.resume_text)
        .replace("{job_description_section}", &job_description_section)
}

/// Fills the roadmap template.
pub fn roadmap_prompt(
    missing_skills: &[String],
    job_role: &str,
    experience_level: &str,
    existing_skills: &[String],
) -> String {
    let existing = if existing_skills.is_empty() {
        "None specified".to_string()
    } else {
        existing_skills.join(", ")
    };

    ROADMAP_PROMPT_TEMPLATE
        .replace("{experience_level}", experience_level)
        .replace("{job_role}", job_role)
        .replace("{existing_skills}", &existing)
        .replace("{missing_skills}", &missing_skills.join(", "))
}
