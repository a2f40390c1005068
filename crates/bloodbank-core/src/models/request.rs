//! Hospital requests, donation camps and dashboard series.

use serde::{Deserialize, Serialize};

use super::blood::BloodType;

/// Review state of a hospital blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

/// A request for blood units submitted by a hospital. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HospitalRequest {
    pub id: String,
    pub blood_type: BloodType,
    pub units: u32,
    pub date: String,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
}

impl HospitalRequest {
    /// Case-insensitive match on blood type label or status.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        term.is_empty()
            || self.blood_type.as_str().to_lowercase().contains(&term)
            || self.status.as_str().to_lowercase().contains(&term)
    }

    pub fn is_from(&self, hospital_name: &str) -> bool {
        self.hospital.as_deref() == Some(hospital_name)
    }
}

/// An upcoming donation drive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DonationCamp {
    pub id: String,
    pub name: String,
    pub date: String,
    pub time: String,
}

/// One bar of the monthly donations chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyDonations {
    #[serde(rename = "name")]
    pub month: String,
    pub donations: u32,
}
