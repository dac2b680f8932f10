use std::sync::Arc;

use crate::analysis::rules::SkillRules;
use crate::analysis::store::AnalysisStore;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Skill extraction backend. Default: the Gemini `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Diagnostic record of gateway analyses; never read by a route.
    pub store: Arc<dyn AnalysisStore>,
    pub rules: Arc<SkillRules>,
}
