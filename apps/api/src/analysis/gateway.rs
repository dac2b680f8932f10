//! Extraction Gateway: asks the language model for the skills in a job
//! description and diffs them against the user's skills.
//!
//! The missing-skill computation here is exact: case-sensitive and untrimmed.
//! Reports use the fuzzy policy in `matcher` instead.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::matcher::parse_skill_list;
use crate::errors::AppError;
use crate::llm_client::prompts::skill_extraction_prompt;
use crate::llm_client::TextGenerator;

/// Required and missing skills for one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSkills {
    pub required_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Extracted skills not exactly present in `user_skills`.
pub fn exact_missing(extracted: &[String], user_skills: &[String]) -> Vec<String> {
    extracted
        .iter()
        .filter(|skill| !user_skills.contains(*skill))
        .cloned()
        .collect()
}

/// Calls the model once and splits its reply into a skill list.
/// Any failure aborts the whole extraction; there is no partial result.
pub async fn extract_skills(
    job_description: &str,
    user_skills: &[String],
    llm: &dyn TextGenerator,
) -> Result<ExtractedSkills, AppError> {
    let prompt = skill_extraction_prompt(job_description);
    let reply = llm.generate(&prompt).await?;
    debug!("Skill extraction reply: {} chars", reply.len());

    let required_skills = parse_skill_list(&reply);
    let missing_skills = exact_missing(&required_skills, user_skills);

    info!(
        "Extracted {} skills, {} missing",
        required_skills.len(),
        missing_skills.len()
    );

    Ok(ExtractedSkills {
        required_skills,
        missing_skills,
    })
}
