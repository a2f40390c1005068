//! Session store: all mutable state for one running session.

use crate::fixtures;
use crate::inventory::{Inventory, InventoryResult};
use crate::models::{BloodStock, DonationCamp, Donor, HospitalRequest, MonthlyDonations};
use crate::registry::DonorRegistry;

/// Owned session state, passed by reference to view handlers.
///
/// The donor registry and the inventory are independent; no operation
/// updates both.
#[derive(Debug, Clone)]
pub struct BloodBankStore {
    pub registry: DonorRegistry,
    pub inventory: Inventory,
    requests: Vec<HospitalRequest>,
    camps: Vec<DonationCamp>,
    chart: Vec<MonthlyDonations>,
}

impl BloodBankStore {
    /// Build a store from explicit seed data.
    pub fn new(
        donors: Vec<Donor>,
        stocks: Vec<BloodStock>,
        requests: Vec<HospitalRequest>,
        camps: Vec<DonationCamp>,
        chart: Vec<MonthlyDonations>,
    ) -> InventoryResult<Self> {
        Ok(Self {
            registry: DonorRegistry::new(donors),
            inventory: Inventory::from_stocks(stocks)?,
            requests,
            camps,
            chart,
        })
    }

    /// A fresh session seeded with the mock dataset.
    pub fn seeded() -> Self {
        Self {
            registry: DonorRegistry::new(fixtures::donors()),
            inventory: Inventory::seeded(),
            requests: fixtures::hospital_requests(),
            camps: fixtures::donation_camps(),
            chart: fixtures::monthly_donations(),
        }
    }

    pub fn requests(&self) -> &[HospitalRequest] {
        &self.requests
    }

    pub fn camps(&self) -> &[DonationCamp] {
        &self.camps
    }

    pub fn chart(&self) -> &[MonthlyDonations] {
        &self.chart
    }
}

impl Default for BloodBankStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_matches_fixtures() {
        let store = BloodBankStore::seeded();
        assert_eq!(store.registry.len(), 3);
        assert_eq!(store.inventory.stocks().len(), 8);
        assert_eq!(store.requests().len(), 4);
        assert_eq!(store.camps().len(), 2);
        assert_eq!(store.chart().len(), 7);
    }

    #[test]
    fn test_new_validates_stock() {
        let result = BloodBankStore::new(
            fixtures::donors(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );
        assert!(result.is_err());
    }
}
