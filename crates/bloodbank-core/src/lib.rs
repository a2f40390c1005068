//! Blood Bank Core Library
//!
//! Session state and role dashboards for a blood bank front-end, running
//! entirely over an in-memory mock dataset.
//!
//! # Architecture
//!
//! ```text
//!                  Session (current user, active view)
//!                               │
//!              ┌────────────────┼────────────────┐
//!              ▼                ▼                ▼
//!        Donor dashboard   Admin screens   Hospital screens
//!                               │
//!                 ┌─────────────┼──────────────┐
//!                 ▼             ▼              ▼
//!          Donor registry   Inventory    Analysis board
//!        (filter/sort/edit) (unit counts) (per-row fatigue)
//!                 │             │
//!                 └──── BloodBankStore ────┘
//!                         (fixtures)
//! ```
//!
//! Nothing is persisted; every session starts from the fixtures.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Donor, BloodStock, HospitalRequest, etc.)
//! - [`registry`]: Donor list filtering, sorting, creation and edits
//! - [`inventory`]: Per-type blood stock counts
//! - [`analysis`]: Per-donor fatigue analysis row state
//! - [`dashboards`]: Read-only role screens
//! - [`shell`]: Login, navigation and role dispatch
//! - [`store`]: Owned session state

pub mod analysis;
pub mod dashboards;
pub mod fixtures;
pub mod inventory;
pub mod models;
pub mod registry;
pub mod shell;
pub mod store;

// Re-export commonly used types
pub use analysis::{AnalysisBoard, RowState, Ticket};
pub use inventory::Inventory;
pub use models::{
    BloodStock, BloodType, Donor, FatigueAssessment, HospitalRequest, RequestStatus, Role,
    StockLevel, User,
};
pub use registry::{AgeBand, DonorFilter, DonorRegistry, NewDonor, SortState};
pub use shell::{Screen, Session, View};
pub use store::BloodBankStore;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum BloodBankError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("State error: {0}")]
    StateError(String),
}

impl From<registry::RegistryError> for BloodBankError {
    fn from(e: registry::RegistryError) -> Self {
        match e {
            registry::RegistryError::Validation(msg) => BloodBankError::Validation(msg),
            registry::RegistryError::NotFound(id) => BloodBankError::NotFound(id),
        }
    }
}

impl From<models::UnknownBloodType> for BloodBankError {
    fn from(e: models::UnknownBloodType) -> Self {
        BloodBankError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for BloodBankError {
    fn from(e: serde_json::Error) -> Self {
        BloodBankError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for BloodBankError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        BloodBankError::StateError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Start a new session seeded with the mock dataset.
#[uniffi::export]
pub fn open_blood_bank() -> Arc<BloodBankCore> {
    Arc::new(BloodBankCore::new(BloodBankStore::seeded()))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe session wrapper for FFI.
#[derive(uniffi::Object)]
pub struct BloodBankCore {
    store: Mutex<BloodBankStore>,
    session: Mutex<Session>,
    sort: Mutex<SortState>,
}

impl BloodBankCore {
    pub fn new(store: BloodBankStore) -> Self {
        Self {
            store: Mutex::new(store),
            session: Mutex::new(Session::new()),
            sort: Mutex::new(SortState::unsorted()),
        }
    }
}

#[uniffi::export]
impl BloodBankCore {
    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Sign in as the mock user for a role ("DONOR", "ADMIN", "HOSPITAL").
    pub fn login(&self, role: String) -> Result<String, BloodBankError> {
        let role: Role = role.parse().map_err(BloodBankError::InvalidInput)?;
        let mut session = self.session.lock()?;
        Ok(session.login(role).name().to_string())
    }

    pub fn logout(&self) -> Result<(), BloodBankError> {
        self.session.lock()?.logout();
        Ok(())
    }

    /// Switch the active view (e.g. "donors", "inventory").
    pub fn navigate(&self, view: String) -> Result<(), BloodBankError> {
        let view: View = view.parse().map_err(BloodBankError::InvalidInput)?;
        self.session.lock()?.navigate(view);
        Ok(())
    }

    pub fn active_view(&self) -> Result<String, BloodBankError> {
        Ok(self.session.lock()?.active_view().as_str().to_string())
    }

    /// JSON payload for whatever the current role and view display.
    pub fn current_screen_json(&self) -> Result<String, BloodBankError> {
        let screen = self.session.lock()?.screen();
        let store = self.store.lock()?;

        let json = match screen {
            Screen::Login => serde_json::json!({ "screen": "login" }),
            Screen::Donor(donor) => serde_json::json!({
                "screen": "donorDashboard",
                "data": dashboards::DonorDashboard::build(&store, &donor),
            }),
            Screen::Admin(_, shell::AdminScreen::Dashboard) => serde_json::json!({
                "screen": "adminDashboard",
                "data": dashboards::AdminDashboard::build(&store),
            }),
            Screen::Admin(_, shell::AdminScreen::Donors) => serde_json::json!({
                "screen": "donors",
                "data": store.registry.list(&DonorFilter::default(), &*self.sort.lock()?),
            }),
            Screen::Admin(_, shell::AdminScreen::Requests) => serde_json::json!({
                "screen": "requests",
                "data": dashboards::all_requests(&store),
            }),
            Screen::Admin(_, shell::AdminScreen::Inventory) => serde_json::json!({
                "screen": "inventory",
                "data": store.inventory.stocks(),
            }),
            Screen::Hospital(staff, shell::HospitalScreen::Dashboard) => serde_json::json!({
                "screen": "hospitalDashboard",
                "data": dashboards::HospitalDashboard::build(&store, &staff, ""),
            }),
            Screen::Hospital(_, shell::HospitalScreen::BloodStock) => serde_json::json!({
                "screen": "bloodStock",
                "data": dashboards::stock_gauges(&store),
            }),
        };

        Ok(serde_json::to_string(&json)?)
    }

    // =========================================================================
    // Donor Registry Operations
    // =========================================================================

    /// List donors matching the filter, in the current sort order.
    pub fn list_donors(&self, filter: FfiDonorFilter) -> Result<Vec<FfiDonor>, BloodBankError> {
        let filter = DonorFilter::try_from(filter)?;
        let sort = *self.sort.lock()?;
        let store = self.store.lock()?;
        Ok(store
            .registry
            .list(&filter, &sort)
            .into_iter()
            .map(FfiDonor::from)
            .collect())
    }

    /// Toggle the name sort. Returns "asc" or "desc".
    pub fn request_name_sort(&self) -> Result<String, BloodBankError> {
        let direction = self.sort.lock()?.request(registry::SortKey::Name);
        Ok(match direction {
            registry::SortDirection::Ascending => "asc".into(),
            registry::SortDirection::Descending => "desc".into(),
        })
    }

    /// Register a donor from the new-donor form.
    pub fn create_donor(&self, fields: FfiNewDonor) -> Result<FfiDonor, BloodBankError> {
        let fields = NewDonor::try_from(fields)?;
        let mut store = self.store.lock()?;
        let donor = store.registry.create(fields)?;
        Ok(donor.into())
    }

    /// Replace a donor record wholesale.
    pub fn update_donor(&self, donor: FfiDonor) -> Result<FfiDonor, BloodBankError> {
        let mut store = self.store.lock()?;
        // The edit form does not carry donation history; keep what we have.
        let history = store
            .registry
            .get(&donor.id)
            .map(|d| d.donation_history.clone())
            .ok_or_else(|| BloodBankError::NotFound(donor.id.clone()))?;
        let mut updated = Donor::try_from(donor)?;
        updated.donation_history = history;
        Ok(store.registry.update(updated)?.into())
    }

    // =========================================================================
    // Inventory Operations
    // =========================================================================

    /// List stock records whose type contains the query.
    pub fn list_stock(&self, query: String) -> Result<Vec<FfiBloodStock>, BloodBankError> {
        let store = self.store.lock()?;
        Ok(store.inventory.list(&query).into_iter().map(FfiBloodStock::from).collect())
    }

    /// Overwrite the unit count from raw form input.
    pub fn set_stock_units(
        &self,
        blood_type: String,
        units: String,
    ) -> Result<FfiBloodStock, BloodBankError> {
        let blood_type: BloodType = blood_type.parse()?;
        let mut store = self.store.lock()?;
        Ok(store.inventory.set_units_from_input(blood_type, &units).into())
    }

    // =========================================================================
    // Request Operations
    // =========================================================================

    /// All hospital requests (read-only).
    pub fn list_requests(&self) -> Result<Vec<FfiHospitalRequest>, BloodBankError> {
        let store = self.store.lock()?;
        Ok(store.requests().iter().cloned().map(FfiHospitalRequest::from).collect())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe donor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDonor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub blood_type: String,
    pub total_donations: u32,
    pub last_donation_date: String,
    pub next_eligible_date: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
}

impl From<Donor> for FfiDonor {
    fn from(donor: Donor) -> Self {
        Self {
            id: donor.id,
            name: donor.name,
            email: donor.email,
            blood_type: donor.blood_type.to_string(),
            total_donations: donor.total_donations,
            last_donation_date: donor.last_donation_date,
            next_eligible_date: donor.next_eligible_date,
            age: donor.age,
            phone: donor.phone,
            address: donor.address,
        }
    }
}

impl TryFrom<FfiDonor> for Donor {
    type Error = BloodBankError;

    fn try_from(donor: FfiDonor) -> Result<Self, Self::Error> {
        Ok(Donor {
            blood_type: donor.blood_type.parse()?,
            id: donor.id,
            name: donor.name,
            email: donor.email,
            total_donations: donor.total_donations,
            last_donation_date: donor.last_donation_date,
            next_eligible_date: donor.next_eligible_date,
            age: donor.age,
            phone: donor.phone,
            address: donor.address,
            donation_history: Vec::new(),
        })
    }
}

/// FFI-safe new-donor form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewDonor {
    pub name: String,
    pub email: String,
    pub blood_type: String,
    pub last_donation_date: String,
    pub age: u32,
    pub phone: String,
    pub address: String,
}

impl TryFrom<FfiNewDonor> for NewDonor {
    type Error = BloodBankError;

    fn try_from(form: FfiNewDonor) -> Result<Self, Self::Error> {
        Ok(NewDonor {
            blood_type: form.blood_type.parse()?,
            name: form.name,
            email: form.email,
            last_donation_date: form.last_donation_date,
            age: form.age,
            phone: form.phone,
            address: form.address,
        })
    }
}

/// FFI-safe donor filter. `blood_type` of `None` or "all" matches every type.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDonorFilter {
    pub blood_type: Option<String>,
    pub name_query: String,
    pub age_range: String,
}

impl TryFrom<FfiDonorFilter> for DonorFilter {
    type Error = BloodBankError;

    fn try_from(filter: FfiDonorFilter) -> Result<Self, Self::Error> {
        let blood_type = match filter.blood_type.as_deref() {
            None | Some("all") => None,
            Some(label) => Some(label.parse()?),
        };
        let age_band = filter
            .age_range
            .parse()
            .map_err(|e: registry::RegistryError| BloodBankError::InvalidInput(e.to_string()))?;
        Ok(DonorFilter {
            blood_type,
            name_query: filter.name_query,
            age_band,
        })
    }
}

/// FFI-safe stock record with its card level.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBloodStock {
    pub blood_type: String,
    pub units: u32,
    pub level: String,
}

impl From<BloodStock> for FfiBloodStock {
    fn from(stock: BloodStock) -> Self {
        Self {
            blood_type: stock.blood_type.to_string(),
            units: stock.units,
            level: format!("{:?}", stock.card_level()),
        }
    }
}

/// FFI-safe hospital request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHospitalRequest {
    pub id: String,
    pub blood_type: String,
    pub units: u32,
    pub date: String,
    pub status: String,
    pub reason: Option<String>,
    pub hospital: Option<String>,
}

impl From<HospitalRequest> for FfiHospitalRequest {
    fn from(req: HospitalRequest) -> Self {
        Self {
            id: req.id,
            blood_type: req.blood_type.to_string(),
            units: req.units,
            date: req.date,
            status: req.status.as_str().to_string(),
            reason: req.reason,
            hospital: req.hospital,
        }
    }
}
