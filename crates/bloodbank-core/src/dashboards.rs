//! Read-only role dashboards composed from the session store.

use serde::Serialize;

use crate::models::{
    BloodStock, DonationCamp, Donor, HospitalRequest, HospitalStaff, MonthlyDonations, StockLevel,
};
use crate::store::BloodBankStore;

/// Number of requests previewed on the admin dashboard.
pub const RECENT_REQUEST_COUNT: usize = 3;

/// Duration of the lives-saved count-up, in milliseconds.
pub const COUNTER_DURATION_MS: f64 = 2000.0;

/// A stock record with its display level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockCard {
    pub stock: BloodStock,
    pub level: StockLevel,
}

impl StockCard {
    fn card(stock: BloodStock) -> Self {
        Self {
            level: stock.card_level(),
            stock,
        }
    }

    fn gauge(stock: BloodStock) -> Self {
        Self {
            level: stock.gauge_level(),
            stock,
        }
    }
}

/// Admin landing screen.
#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub chart: Vec<MonthlyDonations>,
    /// Tallest bar, used to scale the chart
    pub chart_max: u32,
    pub stock_cards: Vec<StockCard>,
    pub recent_requests: Vec<HospitalRequest>,
}

impl AdminDashboard {
    pub fn build(store: &BloodBankStore) -> Self {
        Self {
            chart: store.chart().to_vec(),
            chart_max: store.chart().iter().map(|m| m.donations).max().unwrap_or(0),
            stock_cards: store.inventory.stocks().iter().copied().map(StockCard::card).collect(),
            recent_requests: store
                .requests()
                .iter()
                .take(RECENT_REQUEST_COUNT)
                .cloned()
                .collect(),
        }
    }
}

/// Every hospital request, for the admin requests screen.
pub fn all_requests(store: &BloodBankStore) -> Vec<HospitalRequest> {
    store.requests().to_vec()
}

/// Donor landing screen.
#[derive(Debug, Clone, Serialize)]
pub struct DonorDashboard {
    pub initial: Option<char>,
    pub name: String,
    pub blood_group: String,
    pub total_donations: u32,
    pub lives_saved: u32,
    pub last_donation_date: String,
    pub next_eligible_date: String,
    pub upcoming_camps: Vec<DonationCamp>,
}

impl DonorDashboard {
    pub fn build(store: &BloodBankStore, donor: &Donor) -> Self {
        Self {
            initial: donor.initial(),
            name: donor.name.clone(),
            blood_group: donor.blood_type.to_string(),
            total_donations: donor.total_donations,
            lives_saved: donor.lives_saved(),
            last_donation_date: donor.last_donation_date.clone(),
            next_eligible_date: donor.next_eligible_date.clone(),
            upcoming_camps: store.camps().to_vec(),
        }
    }
}

/// Hospital landing screen.
#[derive(Debug, Clone, Serialize)]
pub struct HospitalDashboard {
    pub hospital_name: String,
    pub stock_cards: Vec<StockCard>,
    /// This hospital's requests matching the search term
    pub requests: Vec<HospitalRequest>,
}

impl HospitalDashboard {
    pub fn build(store: &BloodBankStore, staff: &HospitalStaff, search: &str) -> Self {
        Self {
            hospital_name: staff.hospital_name.clone(),
            stock_cards: store.inventory.stocks().iter().copied().map(StockCard::card).collect(),
            requests: store
                .requests()
                .iter()
                .filter(|r| r.is_from(&staff.hospital_name) && r.matches_search(search))
                .cloned()
                .collect(),
        }
    }
}

/// Stock gauges for the hospital blood-stock screen.
pub fn stock_gauges(store: &BloodBankStore) -> Vec<StockCard> {
    store.inventory.stocks().iter().copied().map(StockCard::gauge).collect()
}

/// Linear count-up of the lives-saved figure.
///
/// Driven by frame timestamps from the caller. Stops producing steps once
/// it reaches the target or after [`cancel`](Self::cancel) is called on
/// view teardown.
#[derive(Debug, Clone)]
pub struct LivesSavedCounter {
    target: u32,
    duration_ms: f64,
    started_at: Option<f64>,
    value: u32,
    running: bool,
}

impl LivesSavedCounter {
    pub fn new(target: u32) -> Self {
        Self::with_duration(target, COUNTER_DURATION_MS)
    }

    pub fn with_duration(target: u32, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
            value: 0,
            // Nothing to animate towards zero.
            running: target > 0,
        }
    }

    pub fn for_donor(donor: &Donor) -> Self {
        Self::new(donor.lives_saved())
    }

    /// Advance to `timestamp_ms`. Returns the new value, or `None` when no
    /// further frame should be scheduled.
    pub fn step(&mut self, timestamp_ms: f64) -> Option<u32> {
        if !self.running {
            return None;
        }
        let start = *self.started_at.get_or_insert(timestamp_ms);
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((timestamp_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        };
        self.value = (progress * f64::from(self.target)).floor() as u32;
        if progress >= 1.0 {
            self.running = false;
        }
        Some(self.value)
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
