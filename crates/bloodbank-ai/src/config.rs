//! Analyzer configuration read from the process environment.

use std::time::Duration;

/// Credential for the generative model. Absent means simulated mode.
pub const API_KEY_VAR: &str = "API_KEY";
/// Optional model override.
pub const MODEL_VAR: &str = "BLOODBANK_AI_MODEL";
/// Optional API base URL override.
pub const BASE_URL_VAR: &str = "BLOODBANK_AI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Delay before a simulated answer is returned.
pub const SIMULATED_DELAY: Duration = Duration::from_millis(1500);

/// Settings for the fatigue analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub simulated_delay: Duration,
}

impl Default for AnalyzerConfig {
    /// Simulated mode with the default model.
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            simulated_delay: SIMULATED_DELAY,
        }
    }
}

impl AnalyzerConfig {
    /// Read settings from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            api_key: read(API_KEY_VAR),
            model: read(MODEL_VAR).unwrap_or(defaults.model),
            base_url: read(BASE_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            simulated_delay: defaults.simulated_delay,
        }
    }

    /// Whether analysis falls back to canned responses.
    pub fn is_simulated(&self) -> bool {
        self.api_key.is_none()
    }
}
