//! Axum route handlers for the Analysis API.

use axum::{
    extract::{FromRequest, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use crate::analysis::gateway::{extract_skills, ExtractedSkills};
use crate::analysis::matcher::{parse_skill_list, score_skills, SkillReport};
use crate::analysis::store::AnalysisRecord;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// `Json` extractor whose rejections (bad syntax, wrong field types) become
/// `AppError::Validation`, keeping every error body in the `{error}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub user_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub job_description: String,
    /// Raw comma-separated text, as typed by the user.
    #[serde(default)]
    pub user_skills: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub user_skills: String,
    #[serde(default)]
    pub job_description: String,
}

fn require_job_description(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn require_user_skills(user_skills: &[String]) -> Result<(), AppError> {
    if user_skills.is_empty() {
        return Err(AppError::Validation("userSkills cannot be empty".to_string()));
    }
    Ok(())
}

/// Runs the gateway and keeps a diagnostic record of the result.
async fn run_gateway(
    state: &AppState,
    job_description: &str,
    user_skills: &[String],
) -> Result<ExtractedSkills, AppError> {
    let extracted = extract_skills(job_description, user_skills, state.llm.as_ref()).await?;

    let stored = state
        .store
        .append(AnalysisRecord::new(
            job_description,
            user_skills,
            &extracted.required_skills,
            &extracted.missing_skills,
        ))
        .await;
    debug!("Analysis recorded ({stored} this process)");

    Ok(extracted)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Extracts required skills from a job description and returns those not
/// exactly present in the user's list.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AppJson(request): AppJson<AnalyzeRequest>,
) -> Result<Json<ExtractedSkills>, AppError> {
    require_job_description(&request.job_description)?;
    require_user_skills(&request.user_skills)?;

    let extracted = run_gateway(&state, &request.job_description, &request.user_skills).await?;
    Ok(Json(extracted))
}

/// POST /api/v1/analysis/report
///
/// Full pipeline: gateway extraction → fuzzy matching and scoring.
pub async fn handle_report(
    State(state): State<AppState>,
    AppJson(request): AppJson<ReportRequest>,
) -> Result<Json<SkillReport>, AppError> {
    require_job_description(&request.job_description)?;
    let user_skills = parse_skill_list(&request.user_skills);
    require_user_skills(&user_skills)?;

    let extracted = run_gateway(&state, &request.job_description, &user_skills).await?;

    let report = score_skills(
        &extracted.required_skills,
        &request.user_skills,
        &request.job_description,
        &state.rules,
    );
    Ok(Json(report))
}

/// POST /api/v1/analysis/score
///
/// Scores an already-extracted skill list. No model call.
pub async fn handle_score(
    State(state): State<AppState>,
    AppJson(request): AppJson<ScoreRequest>,
) -> Result<Json<SkillReport>, AppError> {
    let report = score_skills(
        &request.required_skills,
        &request.user_skills,
        &request.job_description,
        &state.rules,
    );
    Ok(Json(report))
}
