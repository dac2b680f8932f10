// Prompt text for skill extraction.
// The reply is parsed as a single comma-separated line, so the prompt
// must keep the model away from lists, numbering and prose.

/// Skill extraction prompt template. Replace `{job_description}` before sending.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = "\
List all the technical and soft skills required in the following job description. \
Respond with the skills only, as a single comma-separated line. \
Do NOT number the skills, use bullet points, or add any explanation.

JOB DESCRIPTION:
{job_description}";

/// Builds the extraction prompt for one job description.
pub fn skill_extraction_prompt(job_description: &str) -> String {
    SKILL_EXTRACTION_PROMPT_TEMPLATE.replace("{job_description}", job_description)
}
