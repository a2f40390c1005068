//! Donor registry: the session's mutable donor list.
//!
//! Supports filtering (blood type, age band, name substring), a
//! toggling name sort, creation from the new-donor form, and wholesale
//! replacement of an existing record.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{BloodType, Donor, NEXT_ELIGIBLE_PLACEHOLDER};

/// Alert shown when the new-donor form is incomplete.
pub const CREATE_DONOR_ALERT: &str =
    "Please fill out all required fields. Donor must be 18 or older.";

/// Minimum donor age accepted by the new-donor form.
pub const MIN_DONOR_AGE: u32 = 18;

/// Registry errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{0}")]
    Validation(String),

    #[error("Donor not found: {0}")]
    NotFound(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Age bucket used by the donor filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgeBand {
    #[default]
    All,
    /// 18 to 25 inclusive
    Young,
    /// 26 to 40 inclusive
    Adult,
    /// 41 and over
    Senior,
}

impl AgeBand {
    pub fn contains(&self, age: u32) -> bool {
        match self {
            AgeBand::All => true,
            AgeBand::Young => (18..=25).contains(&age),
            AgeBand::Adult => (26..=40).contains(&age),
            AgeBand::Senior => age >= 41,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBand::All => "all",
            AgeBand::Young => "18-25",
            AgeBand::Adult => "26-40",
            AgeBand::Senior => "41+",
        }
    }
}

impl FromStr for AgeBand {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(AgeBand::All),
            "18-25" => Ok(AgeBand::Young),
            "26-40" => Ok(AgeBand::Adult),
            "41+" => Ok(AgeBand::Senior),
            other => Err(RegistryError::Validation(format!("Unknown age range: {}", other))),
        }
    }
}

/// Conjunctive donor filter. Default matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonorFilter {
    /// `None` means all blood types
    pub blood_type: Option<BloodType>,
    /// Case-insensitive name substring; empty matches all
    pub name_query: String,
    pub age_band: AgeBand,
}

impl DonorFilter {
    pub fn matches(&self, donor: &Donor) -> bool {
        let blood_type_ok = self.blood_type.map_or(true, |bt| donor.blood_type == bt);
        let name_ok = self.name_query.is_empty()
            || donor
                .name
                .to_lowercase()
                .contains(&self.name_query.to_lowercase());
        blood_type_ok && name_ok && self.age_band.contains(donor.age)
    }
}

/// Sortable columns. Only name is sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Current sort, toggled by repeated requests on the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    current: Option<(SortKey, SortDirection)>,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Request a sort on `key`: ascending unless it is already ascending.
    pub fn request(&mut self, key: SortKey) -> SortDirection {
        let direction = match self.current {
            Some((k, SortDirection::Ascending)) if k == key => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.current = Some((key, direction));
        direction
    }

    pub fn current(&self) -> Option<(SortKey, SortDirection)> {
        self.current
    }

    /// Stable sort, so ties keep collection order.
    pub fn apply(&self, donors: &mut [Donor]) {
        let Some((SortKey::Name, direction)) = self.current else {
            return;
        };
        donors.sort_by(|a, b| {
            let ord = compare_names(&a.name, &b.name);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Fields collected by the new-donor form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonor {
    pub name: String,
    pub email: String,
    pub blood_type: BloodType,
    /// Empty when the donor has never given
    #[serde(default)]
    pub last_donation_date: String,
    pub age: u32,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl Default for NewDonor {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            blood_type: BloodType::APositive,
            last_donation_date: String::new(),
            age: MIN_DONOR_AGE,
            phone: String::new(),
            address: String::new(),
        }
    }
}

impl NewDonor {
    pub fn validate(&self) -> RegistryResult<()> {
        if self.name.is_empty() || self.email.is_empty() || self.age < MIN_DONOR_AGE {
            return Err(RegistryError::Validation(CREATE_DONOR_ALERT.into()));
        }
        Ok(())
    }
}

/// The session's donor list.
#[derive(Debug, Clone, Default)]
pub struct DonorRegistry {
    donors: Vec<Donor>,
}

impl DonorRegistry {
    pub fn new(donors: Vec<Donor>) -> Self {
        Self { donors }
    }

    /// All donors in insertion order.
    pub fn donors(&self) -> &[Donor] {
        &self.donors
    }

    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Donor> {
        self.donors.iter().find(|d| d.id == id)
    }

    /// Donors matching every active predicate, in sort order.
    pub fn list(&self, filter: &DonorFilter, sort: &SortState) -> Vec<Donor> {
        let mut matched: Vec<Donor> = self
            .donors
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        sort.apply(&mut matched);
        debug!(total = self.donors.len(), matched = matched.len(), "Listed donors");
        matched
    }

    /// Register a donor from the new-donor form.
    pub fn create(&mut self, fields: NewDonor) -> RegistryResult<Donor> {
        fields.validate()?;

        let total_donations = if fields.last_donation_date.is_empty() { 0 } else { 1 };
        let donor = Donor {
            id: format!("donor-{}", uuid::Uuid::new_v4()),
            name: fields.name,
            email: fields.email,
            blood_type: fields.blood_type,
            total_donations,
            last_donation_date: fields.last_donation_date,
            next_eligible_date: NEXT_ELIGIBLE_PLACEHOLDER.into(),
            age: fields.age,
            phone: fields.phone,
            address: fields.address,
            donation_history: Vec::new(),
        };

        info!(donor_id = %donor.id, blood_type = %donor.blood_type, "Registered donor");
        self.donors.push(donor.clone());
        Ok(donor)
    }

    /// Replace the record with the same identity. Last writer wins.
    pub fn update(&mut self, donor: Donor) -> RegistryResult<Donor> {
        let slot = self
            .donors
            .iter_mut()
            .find(|d| d.id == donor.id)
            .ok_or_else(|| RegistryError::NotFound(donor.id.clone()))?;
        *slot = donor.clone();
        info!(donor_id = %donor.id, "Updated donor");
        Ok(donor)
    }
}
