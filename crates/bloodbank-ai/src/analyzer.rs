//! Fatigue analyzers: the remote generative model and the simulated fallback.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bloodbank_core::models::{Donor, FatigueAssessment};
use rand::Rng;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::prompts::{build_request_body, make_fatigue_prompt, DonorSnapshot};
use crate::response::{extract_candidate_text, parse_fatigue_output, AnalysisResult};

/// Produces a fatigue assessment for a donor.
#[async_trait]
pub trait FatigueAnalyzer: Send + Sync {
    async fn analyze(&self, donor: &Donor) -> AnalysisResult<FatigueAssessment>;

    /// Short name for logs (e.g. "gemini", "simulated").
    fn name(&self) -> &str;
}

/// Canned answers used when no credential is configured.
pub const CANNED_RESPONSES: [(&str, &str); 3] = [
    ("Low", "Thank them for their recent donation and mention the next drive."),
    ("Medium", "Suggest a slightly longer break before the next donation."),
    ("High", "Recommend a wellness check-in and a significant rest period."),
];

pub fn canned_assessments() -> Vec<FatigueAssessment> {
    CANNED_RESPONSES
        .iter()
        .map(|(risk, suggestion)| FatigueAssessment::new(*risk, *suggestion))
        .collect()
}

/// Stand-in analyzer: waits a fixed delay, then picks a canned answer
/// uniformly at random. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedAnalyzer {
    delay: Duration,
}

impl SimulatedAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl FatigueAnalyzer for SimulatedAnalyzer {
    async fn analyze(&self, donor: &Donor) -> AnalysisResult<FatigueAssessment> {
        tokio::time::sleep(self.delay).await;
        let idx = rand::thread_rng().gen_range(0..CANNED_RESPONSES.len());
        let (risk, suggestion) = CANNED_RESPONSES[idx];
        debug!(donor_id = %donor.id, risk, "Simulated fatigue analysis");
        Ok(FatigueAssessment::new(risk, suggestion))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Google Gemini structured-output analyzer.
pub struct GeminiAnalyzer {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiAnalyzer {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Request body for one donor as of today.
    pub fn request_body(&self, donor: &Donor) -> Value {
        let today = chrono::Local::now().date_naive();
        let snapshot = DonorSnapshot::from_donor(donor, today);
        build_request_body(&make_fatigue_prompt(&snapshot))
    }
}

#[async_trait]
impl FatigueAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, donor: &Donor) -> AnalysisResult<FatigueAssessment> {
        let body = self.request_body(donor);

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let json: Value = resp.json().await?;
        let text = extract_candidate_text(&json)?;
        let assessment = parse_fatigue_output(text)?;
        debug!(donor_id = %donor.id, risk = %assessment.fatigue_risk, "Gemini fatigue analysis");
        Ok(assessment)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Pick the analyzer for a configuration: Gemini when a key is set,
/// otherwise the simulated fallback.
pub fn analyzer_from_config(config: &AnalyzerConfig) -> Arc<dyn FatigueAnalyzer> {
    match &config.api_key {
        Some(key) => Arc::new(GeminiAnalyzer::new(key, &config.model, &config.base_url)),
        None => {
            warn!("API_KEY environment variable not set. Using simulated fatigue analysis.");
            Arc::new(SimulatedAnalyzer::new(config.simulated_delay))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::AnalysisError;
    use bloodbank_core::fixtures;

    #[test]
    fn test_from_config_selects_mode() {
        let simulated = analyzer_from_config(&AnalyzerConfig::default());
        assert_eq!(simulated.name(), "simulated");

        let config = AnalyzerConfig {
            api_key: Some("key-123".into()),
            ..AnalyzerConfig::default()
        };
        assert_eq!(analyzer_from_config(&config).name(), "gemini");
    }

    #[test]
    fn test_gemini_endpoint() {
        let gemini = GeminiAnalyzer::new("key-123", "gemini-2.5-flash", "http://localhost:1/v1beta/");
        assert_eq!(
            gemini.endpoint(),
            "http://localhost:1/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!gemini.endpoint().contains("key-123"));
    }

    #[test]
    fn test_gemini_request_body() {
        let gemini = GeminiAnalyzer::new("k", "m", "http://localhost:1");
        let body = gemini.request_body(&fixtures::donor());
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("- Age: 25"));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[tokio::test]
    async fn test_gemini_transport_failure_is_terminal() {
        // Nothing listens on the discard port.
        let gemini = GeminiAnalyzer::new("k", "m", "http://127.0.0.1:9");
        let result = gemini.analyze(&fixtures::donor()).await;
        assert!(matches!(result, Err(AnalysisError::Http(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_waits_then_answers() {
        let analyzer = SimulatedAnalyzer::new(Duration::from_millis(1500));
        let started = tokio::time::Instant::now();

        let assessment = analyzer.analyze(&fixtures::donor()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert!(canned_assessments().contains(&assessment));
    }
}
