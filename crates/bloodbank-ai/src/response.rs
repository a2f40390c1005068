//! Fatigue assessment parsing from model output.

use bloodbank_core::models::FatigueAssessment;
use serde_json::Value;
use thiserror::Error;

/// Analysis errors. Every variant is terminal for the call.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        AnalysisError::Http(e.to_string())
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Pull the generated text out of a `generateContent` response.
pub fn extract_candidate_text(response: &Value) -> AnalysisResult<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::trim)
        .ok_or_else(|| {
            AnalysisError::InvalidFormat("Missing candidates[0].content.parts[0].text".into())
        })
}

/// Parse model text into an assessment.
///
/// The whole text, apart from surrounding whitespace, must be a JSON
/// object carrying exactly `fatigueRisk` and `outreachSuggestion`, both
/// strings.
pub fn parse_fatigue_output(text: &str) -> AnalysisResult<FatigueAssessment> {
    let assessment: FatigueAssessment = serde_json::from_str(text.trim())?;
    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_plain_object() {
        let out = parse_fatigue_output(
            r#"{"fatigueRisk":"Medium","outreachSuggestion":"Take a longer break."}"#,
        )
        .unwrap();
        assert_eq!(out.fatigue_risk, "Medium");
        assert_eq!(out.outreach_suggestion, "Take a longer break.");
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        let text = "\n  {\"fatigueRisk\":\"High\",\"outreachSuggestion\":\"Rest.\"}\n";
        assert_eq!(parse_fatigue_output(text).unwrap().fatigue_risk, "High");
    }

    #[test]
    fn test_parse_rejects_text_around_object() {
        let fenced = "```json\n{\"fatigueRisk\":\"High\",\"outreachSuggestion\":\"Rest.\"}\n```";
        assert!(matches!(
            parse_fatigue_output(fenced),
            Err(AnalysisError::JsonParse(_))
        ));

        let prose = "Here you go: {\"fatigueRisk\":\"Low\",\"outreachSuggestion\":\"Thanks.\"}";
        assert!(parse_fatigue_output(prose).is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(matches!(
            parse_fatigue_output("no json here"),
            Err(AnalysisError::JsonParse(_))
        ));
        assert!(matches!(
            parse_fatigue_output(r#"{"fatigueRisk":"Low"}"#),
            Err(AnalysisError::JsonParse(_))
        ));
        assert!(matches!(
            parse_fatigue_output(r#"{"fatigueRisk":3,"outreachSuggestion":"x"}"#),
            Err(AnalysisError::JsonParse(_))
        ));
        assert!(parse_fatigue_output("} {").is_err());
    }

    #[test]
    fn test_extract_candidate_text() {
        let raw = json!({
            "candidates": [{
                "content": {"parts": [{"text": "  {\"a\":1}  "}]}
            }]
        });
        assert_eq!(extract_candidate_text(&raw).unwrap(), "{\"a\":1}");

        let empty = json!({ "candidates": [] });
        assert!(extract_candidate_text(&empty).is_err());
    }
}
