//! Donor models.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::blood::BloodType;

/// Placeholder shown until an eligibility rule exists.
pub const NEXT_ELIGIBLE_PLACEHOLDER: &str = "N/A";

/// A registered blood donor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    /// Unique identity (e.g. "donor-123")
    pub id: String,
    pub name: String,
    pub email: String,
    pub blood_type: BloodType,
    /// Lifetime donation count
    pub total_donations: u32,
    /// Free text, not validated as a date
    pub last_donation_date: String,
    /// Free text, not validated as a date
    pub next_eligible_date: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
    /// Most recent donation first; only read by fatigue analysis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub donation_history: Vec<DonationRecord>,
}

/// A single past donation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationRecord {
    pub date: String,
}

impl DonationRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self { date: date.into() }
    }

    /// Calendar date of this donation, if the text is recognisable.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_donation_date(&self.date)
    }
}

impl Donor {
    /// Estimated lives saved (three per donation).
    pub fn lives_saved(&self) -> u32 {
        self.total_donations.saturating_mul(3)
    }

    /// Upper-case first letter of the name, used as an avatar.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }

    /// Number of dated donations strictly after `since`.
    pub fn donations_since(&self, since: NaiveDate) -> usize {
        self.donation_history
            .iter()
            .filter_map(DonationRecord::parsed_date)
            .filter(|date| *date > since)
            .count()
    }
}

/// Leniently parse the free-text dates used across the dataset.
///
/// Accepts ISO dates (`2024-07-20`), RFC 3339 timestamps, and
/// month-name dates (`January 15, 2024`, `Feb 10, 2024`).
pub fn parse_donation_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.date_naive());
    }

    ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%B %d %Y", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}
