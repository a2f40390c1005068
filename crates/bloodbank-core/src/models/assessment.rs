//! Fatigue assessment models.

use serde::{Deserialize, Serialize};

/// Heuristic label for how hard a donor is being asked to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Result of a fatigue analysis for one donor.
///
/// The risk is kept as free text because the model is not forced to
/// answer with one of the three labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FatigueAssessment {
    pub fatigue_risk: String,
    pub outreach_suggestion: String,
}

impl FatigueAssessment {
    pub fn new(fatigue_risk: impl Into<String>, outreach_suggestion: impl Into<String>) -> Self {
        Self {
            fatigue_risk: fatigue_risk.into(),
            outreach_suggestion: outreach_suggestion.into(),
        }
    }

    /// Interpret the free-text risk, ignoring case and padding.
    pub fn risk_level(&self) -> Option<RiskLevel> {
        match self.fatigue_risk.trim().to_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}
