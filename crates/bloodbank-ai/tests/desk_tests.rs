//! Fatigue desk integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bloodbank_ai::{
    canned_assessments, AnalysisError, AnalysisResult, DeskError, FatigueAnalyzer, FatigueDesk,
    SimulatedAnalyzer,
};
use bloodbank_core::analysis::{RowState, ANALYSIS_FAILED};
use bloodbank_core::fixtures;
use bloodbank_core::models::{Donor, FatigueAssessment};
use tokio::sync::Notify;

/// Always fails, as a broken transport would.
struct FailingAnalyzer;

#[async_trait]
impl FatigueAnalyzer for FailingAnalyzer {
    async fn analyze(&self, _donor: &Donor) -> AnalysisResult<FatigueAssessment> {
        Err(AnalysisError::Http("connection reset".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Holds one donor's analysis until released; answers others immediately.
struct GatedAnalyzer {
    gated_id: String,
    release: Arc<Notify>,
}

#[async_trait]
impl FatigueAnalyzer for GatedAnalyzer {
    async fn analyze(&self, donor: &Donor) -> AnalysisResult<FatigueAssessment> {
        if donor.id == self.gated_id {
            self.release.notified().await;
        }
        Ok(FatigueAssessment::new("Low", format!("Thanks, {}", donor.name)))
    }

    fn name(&self) -> &str {
        "gated"
    }
}

#[tokio::test(start_paused = true)]
async fn test_simulated_mode_only_returns_canned_answers() {
    let desk = FatigueDesk::new(Arc::new(SimulatedAnalyzer::new(Duration::from_millis(1500))));
    let canned = canned_assessments();

    for (i, mut donor) in std::iter::repeat(fixtures::donor()).take(25).enumerate() {
        donor.id = format!("donor-sim-{}", i);
        match desk.analyze(&donor).await.unwrap() {
            RowState::Completed(assessment) => assert!(canned.contains(&assessment)),
            other => panic!("unexpected row state: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_failure_becomes_row_marker() {
    let desk = FatigueDesk::new(Arc::new(FailingAnalyzer));
    let donor = fixtures::donor();

    let state = desk.analyze(&donor).await.unwrap();
    assert_eq!(
        state,
        RowState::Failed {
            error: ANALYSIS_FAILED.into()
        }
    );

    // No automatic retry and the trigger stays hidden.
    assert!(!desk.can_trigger(&donor.id));
    assert_eq!(
        desk.analyze(&donor).await,
        Err(DeskError::AlreadyRecorded(donor.id.clone()))
    );
}

#[tokio::test]
async fn test_pending_donor_does_not_block_others() {
    let release = Arc::new(Notify::new());
    let donors = fixtures::donors();
    let jane = donors[0].clone();
    let john = donors[1].clone();

    let desk = Arc::new(FatigueDesk::new(Arc::new(GatedAnalyzer {
        gated_id: jane.id.clone(),
        release: Arc::clone(&release),
    })));

    let handle = {
        let desk = Arc::clone(&desk);
        let jane = jane.clone();
        tokio::spawn(async move { desk.analyze(&jane).await })
    };

    while desk.state(&jane.id) != RowState::Pending {
        tokio::task::yield_now().await;
    }

    assert!(!desk.can_trigger(&jane.id));
    assert!(desk.can_trigger(&john.id));
    assert_eq!(
        desk.analyze(&jane).await,
        Err(DeskError::AlreadyPending(jane.id.clone()))
    );

    let john_state = desk.analyze(&john).await.unwrap();
    assert!(matches!(john_state, RowState::Completed(_)));
    assert_eq!(desk.state(&jane.id), RowState::Pending);

    release.notify_one();
    let jane_state = handle.await.unwrap().unwrap();
    assert_eq!(
        jane_state,
        RowState::Completed(FatigueAssessment::new("Low", "Thanks, Jane Smith"))
    );
}

#[tokio::test]
async fn test_teardown_forgets_results() {
    let desk = FatigueDesk::new(Arc::new(FailingAnalyzer));
    let donor = fixtures::donor();
    desk.analyze(&donor).await.unwrap();

    desk.teardown();
    assert!(desk.can_trigger(&donor.id));
    assert_eq!(desk.state(&donor.id), RowState::Idle);
}

#[tokio::test]
async fn test_teardown_discards_in_flight_result() {
    let release = Arc::new(Notify::new());
    let donor = fixtures::donor();
    let desk = Arc::new(FatigueDesk::new(Arc::new(GatedAnalyzer {
        gated_id: donor.id.clone(),
        release: Arc::clone(&release),
    })));

    let handle = {
        let desk = Arc::clone(&desk);
        let donor = donor.clone();
        tokio::spawn(async move { desk.analyze(&donor).await })
    };
    while desk.state(&donor.id) != RowState::Pending {
        tokio::task::yield_now().await;
    }

    desk.teardown();
    release.notify_one();

    assert_eq!(handle.await.unwrap(), Ok(RowState::Idle));
    assert_eq!(desk.state(&donor.id), RowState::Idle);
    assert!(desk.can_trigger(&donor.id));
}

#[tokio::test(start_paused = true)]
async fn test_aborted_analysis_returns_row_to_idle() {
    let desk = Arc::new(FatigueDesk::new(Arc::new(SimulatedAnalyzer::new(
        Duration::from_millis(1500),
    ))));
    let donor = fixtures::donor();

    let handle = {
        let desk = Arc::clone(&desk);
        let donor = donor.clone();
        tokio::spawn(async move { desk.analyze(&donor).await })
    };
    while desk.state(&donor.id) != RowState::Pending {
        tokio::task::yield_now().await;
    }

    handle.abort();
    assert!(handle.await.unwrap_err().is_cancelled());
    tokio::time::advance(Duration::from_secs(10)).await;

    assert_eq!(desk.state(&donor.id), RowState::Idle);
    assert!(desk.can_trigger(&donor.id));

    // The row can be analysed again.
    let state = desk.analyze(&donor).await.unwrap();
    assert!(matches!(state, RowState::Completed(_)));
}
