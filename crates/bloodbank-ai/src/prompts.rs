//! Fatigue analysis prompt and response schema.

use bloodbank_core::models::Donor;
use chrono::{Months, NaiveDate};
use serde::Serialize;
use serde_json::{json, Value};

/// The donor facts sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorSnapshot {
    pub age: u32,
    pub total_donations: u32,
    /// First entry of the donation history, if any
    pub last_donation_date: Option<String>,
    pub donations_in_last_12_months: usize,
}

impl DonorSnapshot {
    /// Summarise a donor as of `today`.
    pub fn from_donor(donor: &Donor, today: NaiveDate) -> Self {
        let year_ago = today.checked_sub_months(Months::new(12)).unwrap_or(today);
        Self {
            age: donor.age,
            total_donations: donor.total_donations,
            last_donation_date: donor.donation_history.first().map(|r| r.date.clone()),
            donations_in_last_12_months: donor.donations_since(year_ago),
        }
    }
}

/// Build the analysis prompt for one donor.
pub fn make_fatigue_prompt(snapshot: &DonorSnapshot) -> String {
    format!(
        r#"Analyze the following blood donor's data to determine their potential fatigue risk from donating too frequently.
Provide a risk level (Low, Medium, or High) and a concise, friendly outreach suggestion for the admin.

Donor Data:
- Age: {}
- Total Donations: {}
- Last Donation Date: {}
- Donations in last 12 months: {}

Respond ONLY with a JSON object in the specified format."#,
        snapshot.age,
        snapshot.total_donations,
        snapshot.last_donation_date.as_deref().unwrap_or("N/A"),
        snapshot.donations_in_last_12_months,
    )
}

/// Structured-output schema: exactly two required string fields.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "fatigueRisk": {
                "type": "STRING",
                "description": "The calculated fatigue risk level for the donor. Can be 'Low', 'Medium', or 'High'."
            },
            "outreachSuggestion": {
                "type": "STRING",
                "description": "A short, friendly, and actionable message for an admin to send to the donor."
            }
        },
        "required": ["fatigueRisk", "outreachSuggestion"]
    })
}

/// Full `generateContent` request body.
pub fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}
