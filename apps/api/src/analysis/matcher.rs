//! Matching & Scoring Engine: pure, deterministic skill matching over the
//! gateway's required skills and the user's raw skill text.
//!
//! Algorithm:
//! 1. Normalize: lowercase, trim, drop dots, hyphens and whitespace.
//! 2. Fuzzy match: a required skill is matched when a normalized user skill
//!    is a substring of it or vice versa. This policy is authoritative for
//!    every `SkillReport`.
//! 3. Categorize: technical when the lowercased skill contains a technical
//!    keyword as a whole word, soft otherwise.
//! 4. Percentages: overall, technical-only and soft-only match ratios.
//! 5. Readiness: weighted composite of the three rounded percentages, 0–100.
//! 6. Rank missing skills by how strongly the job description asks for them.
//! 7. Roadmap: one fixed line per triggered bucket, or a fallback line.

use serde::{Deserialize, Serialize};

use crate::analysis::rules::{ReadinessWeights, SkillRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Soft,
}

/// Full dashboard snapshot for one analysis. Replaced wholesale per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillReport {
    pub required_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub match_percentage: u32,
    pub technical_match_percentage: u32,
    pub soft_match_percentage: u32,
    pub readiness_score: u32,
    pub readiness_tip: String,
    pub top_missing_skills: Vec<String>,
    pub roadmap: Vec<String>,
    pub rules_version: String,
}

/// Lowercases and trims, then strips dots, hyphens and whitespace.
/// "Node.js" and "node js" both become "nodejs".
pub fn normalize_skill(skill: &str) -> String {
    skill
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '.' && *c != '-' && !c.is_whitespace())
        .collect()
}

/// Splits comma-separated skill text into trimmed, non-empty entries.
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized user skills, with entries that normalize to nothing dropped
/// (an empty string would otherwise match every required skill).
pub fn normalized_user_skills(user_skills_raw: &str) -> Vec<String> {
    parse_skill_list(user_skills_raw)
        .iter()
        .map(|s| normalize_skill(s))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Substring match in either direction over normalized forms.
pub fn is_fuzzy_match(required_skill: &str, normalized_user: &[String]) -> bool {
    let required = normalize_skill(required_skill);
    if required.is_empty() {
        return false;
    }
    normalized_user
        .iter()
        .any(|user| required.contains(user.as_str()) || user.contains(required.as_str()))
}

pub fn categorize(skill: &str, rules: &SkillRules) -> SkillCategory {
    if rules.technical_pattern.is_match(&skill.to_lowercase()) {
        SkillCategory::Technical
    } else {
        SkillCategory::Soft
    }
}

/// `round(100 * matched / total)`, 0 for an empty total.
pub fn match_percentage(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * matched as f64 / total as f64).round() as u32
}

pub fn readiness_score(overall: u32, technical: u32, soft: u32, weights: &ReadinessWeights) -> u32 {
    let raw = overall as f64 * weights.overall
        + technical as f64 * weights.technical
        + soft as f64 * weights.soft;
    raw.round().clamp(0.0, 100.0) as u32
}

/// Tip of the first band whose threshold the score reaches.
pub fn readiness_tip(score: u32, rules: &SkillRules) -> &str {
    rules
        .readiness_tips
        .iter()
        .find(|band| score >= band.min_score)
        .map(|band| band.tip.as_str())
        .unwrap_or(rules.fallback_tip.as_str())
}

/// Importance of one missing skill within a lowercased job description.
///
/// Each literal occurrence of the skill earns `occurrence_points`, plus
/// `importance_points` when an importance phrase ("strong ", "experience with ")
/// directly precedes it.
pub fn importance_score(skill: &str, description_lower: &str, rules: &SkillRules) -> u32 {
    let skill_lower = skill.to_lowercase();
    if skill_lower.trim().is_empty() {
        return 0;
    }

    description_lower
        .match_indices(skill_lower.as_str())
        .map(|(at, _)| {
            if rules.importance_pattern.is_match(&description_lower[..at]) {
                rules.importance_points + rules.occurrence_points
            } else {
                rules.occurrence_points
            }
        })
        .sum()
}

/// Missing skills ordered by importance, capped at `top_missing_limit`.
///
/// Skills scoring above zero come first, highest score first (ties keep input
/// order). When fewer than the limit score, the rest of the missing skills
/// pad the list in input order.
pub fn rank_missing_skills(
    missing: &[String],
    job_description: &str,
    rules: &SkillRules,
) -> Vec<String> {
    let description_lower = job_description.to_lowercase();
    let limit = rules.top_missing_limit;

    let mut scored = Vec::with_capacity(missing.len());
    for skill in missing {
        let score = importance_score(skill, &description_lower, rules);
        if score > 0 {
            scored.push((skill, score));
        }
    }
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut top: Vec<String> = scored
        .into_iter()
        .take(limit)
        .map(|(skill, _)| skill.clone())
        .collect();

    for skill in missing {
        if top.len() >= limit {
            break;
        }
        if !top.contains(skill) {
            top.push(skill.clone());
        }
    }

    top
}

/// One line per roadmap bucket any missing skill triggers, in bucket order.
/// Bucket keywords match whole words, so "JavaScript" does not trigger "java".
pub fn build_roadmap(missing: &[String], rules: &SkillRules) -> Vec<String> {
    let missing_lower: Vec<String> = missing.iter().map(|s| s.to_lowercase()).collect();

    let lines: Vec<String> = rules
        .roadmap
        .iter()
        .filter(|bucket| missing_lower.iter().any(|skill| bucket.pattern.is_match(skill)))
        .map(|bucket| bucket.line.clone())
        .collect();

    if lines.is_empty() {
        vec![rules.roadmap_fallback.clone()]
    } else {
        lines
    }
}

/// Runs the whole engine for one analysis.
pub fn score_skills(
    required_skills: &[String],
    user_skills_raw: &str,
    job_description: &str,
    rules: &SkillRules,
) -> SkillReport {
    let normalized_user = normalized_user_skills(user_skills_raw);

    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();
    let mut technical_skills = Vec::new();
    let mut soft_skills = Vec::new();
    let mut technical_matched = 0;
    let mut soft_matched = 0;

    for skill in required_skills {
        let matched = is_fuzzy_match(skill, &normalized_user);
        if matched {
            matched_skills.push(skill.clone());
        } else {
            missing_skills.push(skill.clone());
        }

        match categorize(skill, rules) {
            SkillCategory::Technical => {
                technical_skills.push(skill.clone());
                technical_matched += usize::from(matched);
            }
            SkillCategory::Soft => {
                soft_skills.push(skill.clone());
                soft_matched += usize::from(matched);
            }
        }
    }

    let match_pct = match_percentage(matched_skills.len(), required_skills.len());
    let technical_pct = match_percentage(technical_matched, technical_skills.len());
    let soft_pct = match_percentage(soft_matched, soft_skills.len());
    let readiness = readiness_score(match_pct, technical_pct, soft_pct, &rules.readiness);

    let top_missing_skills = rank_missing_skills(&missing_skills, job_description, rules);
    let roadmap = build_roadmap(&missing_skills, rules);

    SkillReport {
        required_skills: required_skills.to_vec(),
        matched_skills,
        missing_skills,
        technical_skills,
        soft_skills,
        match_percentage: match_pct,
        technical_match_percentage: technical_pct,
        soft_match_percentage: soft_pct,
        readiness_score: readiness,
        readiness_tip: readiness_tip(readiness, rules).to_string(),
        top_missing_skills,
        roadmap,
        rules_version: rules.version.clone(),
    }
}
