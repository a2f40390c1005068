//! Fatigue desk: runs analyses for the donor list and records row state.
//!
//! One analysis may be in flight per donor. Different donors are analysed
//! concurrently and complete in any order. After `teardown`, late outcomes
//! are discarded, and an `analyze` future dropped before it finishes
//! returns its row to idle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bloodbank_core::analysis::{AnalysisBoard, BeginRefused, RowState, Ticket};
use bloodbank_core::models::Donor;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::analyzer::FatigueAnalyzer;

/// Why an analysis was not started.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeskError {
    #[error("Analysis already in progress for donor {0}")]
    AlreadyPending(String),

    #[error("Analysis already recorded for donor {0}")]
    AlreadyRecorded(String),
}

pub struct FatigueDesk {
    analyzer: Arc<dyn FatigueAnalyzer>,
    board: Mutex<AnalysisBoard>,
}

fn lock(board: &Mutex<AnalysisBoard>) -> MutexGuard<'_, AnalysisBoard> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns a started row to idle unless its outcome was recorded.
struct PendingRow<'a> {
    board: &'a Mutex<AnalysisBoard>,
    donor_id: &'a str,
    ticket: Ticket,
    settled: bool,
}

impl Drop for PendingRow<'_> {
    fn drop(&mut self) {
        if !self.settled && lock(self.board).abandon(self.donor_id, self.ticket) {
            debug!(donor_id = %self.donor_id, "Analysis dropped before completion");
        }
    }
}

impl FatigueDesk {
    pub fn new(analyzer: Arc<dyn FatigueAnalyzer>) -> Self {
        Self {
            analyzer,
            board: Mutex::new(AnalysisBoard::new()),
        }
    }

    fn board(&self) -> MutexGuard<'_, AnalysisBoard> {
        lock(&self.board)
    }

    pub fn state(&self, donor_id: &str) -> RowState {
        self.board().state(donor_id)
    }

    pub fn can_trigger(&self, donor_id: &str) -> bool {
        self.board().can_trigger(donor_id)
    }

    /// Analyse one donor and record the outcome on its row.
    ///
    /// Analyzer failures are not returned as errors; they become the
    /// row's failure marker. An outcome arriving after `teardown` is
    /// dropped and the returned state is the row's current one.
    pub async fn analyze(&self, donor: &Donor) -> Result<RowState, DeskError> {
        let ticket = self.board().begin(&donor.id).map_err(|refused| match refused {
            BeginRefused::AlreadyPending => DeskError::AlreadyPending(donor.id.clone()),
            BeginRefused::AlreadyRecorded => DeskError::AlreadyRecorded(donor.id.clone()),
        })?;
        let mut row = PendingRow {
            board: &self.board,
            donor_id: &donor.id,
            ticket,
            settled: false,
        };

        let outcome = self.analyzer.analyze(donor).await;

        let mut board = self.board();
        row.settled = true;
        let recorded = match outcome {
            Ok(assessment) => {
                let risk = assessment.fatigue_risk.clone();
                let recorded = board.complete(&donor.id, ticket, assessment);
                if recorded {
                    info!(
                        donor_id = %donor.id,
                        analyzer = self.analyzer.name(),
                        risk = %risk,
                        "Fatigue analysis recorded"
                    );
                }
                recorded
            }
            Err(e) => {
                error!(donor_id = %donor.id, error = %e, "Analysis failed for donor");
                board.fail(&donor.id, ticket)
            }
        };
        if !recorded {
            debug!(donor_id = %donor.id, "Discarding analysis outcome after teardown");
        }
        Ok(board.state(&donor.id))
    }

    /// Forget every row, as when the donor list is closed.
    pub fn teardown(&self) {
        self.board().clear();
    }
}
