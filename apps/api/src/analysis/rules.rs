//! Skill Rules: versioned keyword lists, weights and fixed texts that drive
//! the matching engine.
//!
//! The built-in rules are compiled in from `skill_rules.toml`; a deployment
//! can point `SKILL_RULES_PATH` at its own file to try variations without a
//! rebuild. Every report carries the `version` of the rules that produced it.
//!
//! Keyword lists are compiled into word-bounded patterns once per load, so
//! "rust" never fires on "Trustworthiness" and request data never reaches
//! the regex compiler.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_RULES: &str = include_str!("../../skill_rules.toml");

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rules: {0}")]
    Invalid(String),

    #[error("failed to compile rules pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Letters on either side of a keyword make it part of a longer word.
/// Digits and punctuation do not ("html5", "node.js", "c++ ").
const WORD_START: &str = r"(?:^|[^\p{L}])";
const WORD_END: &str = r"(?:$|[^\p{L}])";

/// A compiled rules pattern. The default pattern matches nothing.
#[derive(Debug, Clone, Default)]
pub struct RulePattern(Option<Regex>);

impl RulePattern {
    /// Matches text containing any keyword as a whole word.
    pub fn keywords(keywords: &[String]) -> Result<Self, regex::Error> {
        if keywords.is_empty() {
            return Ok(Self(None));
        }
        let alternation = escaped_alternation(keywords);
        let regex = Regex::new(&format!(
            "{start}(?:{alternation}){end}",
            start = WORD_START,
            end = WORD_END
        ))?;
        Ok(Self(Some(regex)))
    }

    /// Matches text ending in an importance phrase prefix such as
    /// "strong " or "experience with ", ready for the skill to follow.
    pub fn importance_prefix(words: &[String]) -> Result<Self, regex::Error> {
        if words.is_empty() {
            return Ok(Self(None));
        }
        let alternation = escaped_alternation(words);
        let regex = Regex::new(&format!(
            r"{start}(?:{alternation})\s+(?:with\s+)?$",
            start = WORD_START
        ))?;
        Ok(Self(Some(regex)))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.as_ref().is_some_and(|r| r.is_match(text))
    }

    fn as_str(&self) -> Option<&str> {
        self.0.as_ref().map(Regex::as_str)
    }
}

impl PartialEq for RulePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

fn escaped_alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Weights of the readiness composite. Applied to rounded percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessWeights {
    pub overall: f64,
    pub technical: f64,
    pub soft: f64,
}

/// A readiness band: scores at or above `min_score` get `tip`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessTip {
    pub min_score: u32,
    pub tip: String,
}

/// A roadmap bucket, emitted when any missing skill contains one of its
/// keywords as a whole word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapBucket {
    pub name: String,
    pub keywords: Vec<String>,
    pub line: String,
    #[serde(skip)]
    pub pattern: RulePattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRules {
    pub version: String,
    /// Lowercase words marking a skill as technical.
    pub technical_keywords: Vec<String>,
    /// Words that up-weight a missing skill when they directly precede it.
    pub importance_words: Vec<String>,
    pub importance_points: u32,
    pub occurrence_points: u32,
    pub top_missing_limit: usize,
    pub fallback_tip: String,
    pub roadmap_fallback: String,
    pub readiness: ReadinessWeights,
    /// Ordered by descending `min_score`.
    pub readiness_tips: Vec<ReadinessTip>,
    /// Emission order of roadmap lines.
    pub roadmap: Vec<RoadmapBucket>,
    #[serde(skip)]
    pub technical_pattern: RulePattern,
    #[serde(skip)]
    pub importance_pattern: RulePattern,
}

impl SkillRules {
    /// The rules shipped with the binary.
    pub fn builtin() -> Result<Self, RulesError> {
        Self::from_toml_str(BUILTIN_RULES)
    }

    /// Loads and validates a rules file.
    pub fn from_path(path: &Path) -> Result<Self, RulesError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, RulesError> {
        let mut rules: SkillRules = toml::from_str(text)?;
        rules.normalize_keywords();
        rules.validate()?;
        rules.compile_patterns()?;
        Ok(rules)
    }

    fn compile_patterns(&mut self) -> Result<(), RulesError> {
        self.technical_pattern = RulePattern::keywords(&self.technical_keywords)?;
        self.importance_pattern = RulePattern::importance_prefix(&self.importance_words)?;
        for bucket in &mut self.roadmap {
            bucket.pattern = RulePattern::keywords(&bucket.keywords)?;
        }
        Ok(())
    }

    /// Keywords are matched against lowercased skills, so store them lowercased.
    fn normalize_keywords(&mut self) {
        let lower = |list: &mut Vec<String>| {
            for k in list.iter_mut() {
                *k = k.trim().to_lowercase();
            }
            list.retain(|k| !k.is_empty());
        };
        lower(&mut self.technical_keywords);
        lower(&mut self.importance_words);
        for bucket in &mut self.roadmap {
            lower(&mut bucket.keywords);
        }
    }

    fn validate(&self) -> Result<(), RulesError> {
        if self.version.trim().is_empty() {
            return Err(RulesError::Invalid("version must not be empty".to_string()));
        }
        if self.technical_keywords.is_empty() {
            return Err(RulesError::Invalid(
                "technical_keywords must not be empty".to_string(),
            ));
        }
        if self.importance_words.is_empty() {
            return Err(RulesError::Invalid(
                "importance_words must not be empty".to_string(),
            ));
        }

        let weights = [
            self.readiness.overall,
            self.readiness.technical,
            self.readiness.soft,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RulesError::Invalid(
                "readiness weights must be finite and non-negative".to_string(),
            ));
        }

        if self
            .readiness_tips
            .windows(2)
            .any(|pair| pair[0].min_score <= pair[1].min_score)
        {
            return Err(RulesError::Invalid(
                "readiness_tips must be sorted by descending min_score".to_string(),
            ));
        }

        if let Some(bucket) = self.roadmap.iter().find(|b| b.keywords.is_empty()) {
            return Err(RulesError::Invalid(format!(
                "roadmap bucket '{}' has no keywords",
                bucket.name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_rules_load() {
        let rules = SkillRules::builtin().unwrap();
        assert!(!rules.version.is_empty());
        assert_eq!(rules.importance_points, 5);
        assert_eq!(rules.occurrence_points, 2);
        assert_eq!(rules.top_missing_limit, 5);
        assert!((rules.readiness.overall - 0.6).abs() < f64::EPSILON);
        assert!((rules.readiness.technical - 0.3).abs() < f64::EPSILON);
        assert!((rules.readiness.soft - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builtin_tip_bands_are_80_60_40() {
        let rules = SkillRules::builtin().unwrap();
        let bands: Vec<u32> = rules.readiness_tips.iter().map(|t| t.min_score).collect();
        assert_eq!(bands, vec![80, 60, 40]);
    }

    #[test]
    fn test_builtin_roadmap_bucket_order() {
        let rules = SkillRules::builtin().unwrap();
        let names: Vec<&str> = rules.roadmap.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["fundamentals", "framework", "backend", "tooling", "soft_skills"]
        );
    }

    #[test]
    fn test_builtin_importance_words() {
        let rules = SkillRules::builtin().unwrap();
        for word in [
            "must",
            "required",
            "need",
            "essential",
            "strong",
            "experience",
            "proficiency",
            "proven",
        ] {
            assert!(rules.importance_words.iter().any(|w| w == word), "{word}");
        }
    }

    #[test]
    fn test_keywords_are_lowercased_on_load() {
        let mut text = BUILTIN_RULES.replace("\"html\", \"css\"", "\"HTML\", \" Css \"");
        text.push('\n');
        let rules = SkillRules::from_toml_str(&text).unwrap();
        assert!(rules.technical_keywords.contains(&"html".to_string()));
        assert!(rules.technical_keywords.contains(&"css".to_string()));
    }

    #[test]
    fn test_from_path_reads_override_file() {
        let text = BUILTIN_RULES.replace("version = \"2024.2\"", "version = \"test-override\"");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let rules = SkillRules::from_path(file.path()).unwrap();
        assert_eq!(rules.version, "test-override");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SkillRules::from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, RulesError::Io(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = SkillRules::from_toml_str("version = ").unwrap_err();
        assert!(matches!(err, RulesError::Parse(_)));
    }

    #[test]
    fn test_unsorted_tip_bands_rejected() {
        let mut rules = SkillRules::builtin().unwrap();
        rules.readiness_tips.reverse();
        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("descending"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut rules = SkillRules::builtin().unwrap();
        rules.readiness.soft = -0.1;
        assert!(matches!(rules.validate(), Err(RulesError::Invalid(_))));
    }

    #[test]
    fn test_keyword_pattern_matches_whole_words_only() {
        let pattern = RulePattern::keywords(&["rust".to_string(), "git".to_string()]).unwrap();
        assert!(pattern.is_match("rust"));
        assert!(pattern.is_match("async rust programming"));
        assert!(pattern.is_match("git/github"));
        assert!(!pattern.is_match("trustworthiness"));
        assert!(!pattern.is_match("digital literacy"));
    }

    #[test]
    fn test_keyword_pattern_treats_digits_and_symbols_as_boundaries() {
        let pattern = RulePattern::keywords(&[
            "html".to_string(),
            "c++".to_string(),
            "node".to_string(),
        ])
        .unwrap();
        assert!(pattern.is_match("html5"));
        assert!(pattern.is_match("modern c++ templates"));
        assert!(pattern.is_match("node.js"));
        assert!(!pattern.is_match("nodes"));
    }

    #[test]
    fn test_importance_prefix_anchors_at_end() {
        let pattern = RulePattern::importance_prefix(&[
            "strong".to_string(),
            "experience".to_string(),
        ])
        .unwrap();
        assert!(pattern.is_match("must have strong "));
        assert!(pattern.is_match("proven experience with "));
        assert!(!pattern.is_match("strong sql and "));
        assert!(!pattern.is_match("headstrong "));
    }

    #[test]
    fn test_default_pattern_matches_nothing() {
        assert!(!RulePattern::default().is_match("anything"));
        assert!(!RulePattern::keywords(&[]).unwrap().is_match("anything"));
    }

    #[test]
    fn test_builtin_patterns_compiled_on_load() {
        let rules = SkillRules::builtin().unwrap();
        assert!(rules.technical_pattern.is_match("react"));
        assert!(rules.importance_pattern.is_match("required "));
        assert!(rules.roadmap.iter().all(|b| b.pattern != RulePattern::default()));
    }

    #[test]
    fn test_empty_version_rejected() {
        let mut rules = SkillRules::builtin().unwrap();
        rules.version = "  ".to_string();
        assert!(matches!(rules.validate(), Err(RulesError::Invalid(_))));
    }
}
