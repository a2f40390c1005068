//! Runs a fatigue analysis for every fixture donor and prints the rows as JSON.
//!
//! Set `API_KEY` to call the model; otherwise answers are simulated.

use std::sync::Arc;

use bloodbank_ai::{analyzer_from_config, AnalyzerConfig, FatigueDesk};
use bloodbank_core::BloodBankStore;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AnalyzerConfig::from_env();
    let desk = Arc::new(FatigueDesk::new(analyzer_from_config(&config)));
    let store = BloodBankStore::seeded();

    let handles: Vec<_> = store
        .registry
        .donors()
        .iter()
        .cloned()
        .map(|donor| {
            let desk = Arc::clone(&desk);
            tokio::spawn(async move {
                let row = desk.analyze(&donor).await;
                (donor, row)
            })
        })
        .collect();

    let mut report = Vec::with_capacity(handles.len());
    for handle in handles {
        let (donor, row) = handle.await?;
        let analysis = match row {
            Ok(state) => serde_json::to_value(state)?,
            Err(e) => json!({ "error": e.to_string() }),
        };
        report.push(json!({
            "donorId": donor.id,
            "name": donor.name,
            "bloodType": donor.blood_type,
            "analysis": analysis,
        }));
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
