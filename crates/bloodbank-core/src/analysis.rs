//! Per-row fatigue analysis state for the donor list.
//!
//! Each donor row moves Idle -> Pending -> (Completed | Failed) exactly
//! once per session. Rows are independent: one donor's pending request
//! never blocks another donor's trigger.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::FatigueAssessment;

/// Marker shown in place of a result when the call failed.
pub const ANALYSIS_FAILED: &str = "Analysis failed.";

/// Display state of one donor row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "result", rename_all = "camelCase")]
pub enum RowState {
    Idle,
    Pending,
    Completed(FatigueAssessment),
    Failed { error: String },
}

impl RowState {
    /// Whether the "Analyze" control is shown and enabled.
    pub fn can_trigger(&self) -> bool {
        matches!(self, RowState::Idle)
    }
}

/// Why a row refused a new analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginRefused {
    AlreadyPending,
    AlreadyRecorded,
}

/// Proof that a row was started in a given board generation.
///
/// Outcomes reported with a ticket from before the last `clear` are
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Session-local map of analysis rows keyed by donor identity.
#[derive(Debug, Default)]
pub struct AnalysisBoard {
    rows: HashMap<String, RowState>,
    generation: u64,
}

impl AnalysisBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, donor_id: &str) -> RowState {
        self.rows.get(donor_id).cloned().unwrap_or(RowState::Idle)
    }

    pub fn can_trigger(&self, donor_id: &str) -> bool {
        self.rows.get(donor_id).map_or(true, RowState::can_trigger)
    }

    /// Mark a row pending. Refused unless the row is idle.
    pub fn begin(&mut self, donor_id: &str) -> Result<Ticket, BeginRefused> {
        match self.rows.get(donor_id) {
            Some(RowState::Pending) => Err(BeginRefused::AlreadyPending),
            Some(RowState::Completed(_)) | Some(RowState::Failed { .. }) => {
                Err(BeginRefused::AlreadyRecorded)
            }
            Some(RowState::Idle) | None => {
                self.rows.insert(donor_id.to_string(), RowState::Pending);
                Ok(Ticket {
                    generation: self.generation,
                })
            }
        }
    }

    /// True when `ticket` belongs to the current generation and the row
    /// is still waiting on it.
    fn is_live(&self, donor_id: &str, ticket: Ticket) -> bool {
        ticket.generation == self.generation
            && matches!(self.rows.get(donor_id), Some(RowState::Pending))
    }

    /// Record a result. Returns false if the row was cleared meanwhile.
    pub fn complete(
        &mut self,
        donor_id: &str,
        ticket: Ticket,
        assessment: FatigueAssessment,
    ) -> bool {
        self.settle(donor_id, ticket, RowState::Completed(assessment))
    }

    /// Record the failure marker. Returns false if the row was cleared meanwhile.
    pub fn fail(&mut self, donor_id: &str, ticket: Ticket) -> bool {
        self.settle(
            donor_id,
            ticket,
            RowState::Failed {
                error: ANALYSIS_FAILED.into(),
            },
        )
    }

    /// Return a pending row to idle when its request was dropped unanswered.
    pub fn abandon(&mut self, donor_id: &str, ticket: Ticket) -> bool {
        if !self.is_live(donor_id, ticket) {
            return false;
        }
        self.rows.remove(donor_id);
        true
    }

    fn settle(&mut self, donor_id: &str, ticket: Ticket, state: RowState) -> bool {
        if !self.is_live(donor_id, ticket) {
            return false;
        }
        self.rows.insert(donor_id.to_string(), state);
        true
    }

    /// Donors with a request in flight.
    pub fn pending(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|(_, state)| matches!(state, RowState::Pending))
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Drop all rows (view teardown). Requests still in flight can no
    /// longer record their outcome.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.generation += 1;
    }
}
