use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Optional TOML file overriding the built-in skill rules.
    pub skill_rules_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_port(std::env::var("PORT").ok())?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_rules_path: std::env::var("SKILL_RULES_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_port(raw: Option<String>) -> Result<u16> {
    raw.unwrap_or_else(|| "8080".to_string())
        .parse::<u16>()
        .context("PORT must be a valid port number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults_to_8080() {
        assert_eq!(parse_port(None).unwrap(), 8080);
    }

    #[test]
    fn test_port_parses_explicit_value() {
        assert_eq!(parse_port(Some("3000".to_string())).unwrap(), 3000);
    }

    #[test]
    fn test_port_rejects_garbage() {
        let err = parse_port(Some("not-a-port".to_string())).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_require_env_names_missing_variable() {
        let err = require_env("SKILLGAP_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("SKILLGAP_TEST_SURELY_UNSET_VAR"));
    }
}
