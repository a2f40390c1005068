//! Donor fatigue analysis.
//!
//! Sends a donor summary to a generative model (Google Gemini) and reads
//! back a structured `{fatigueRisk, outreachSuggestion}` answer. Without a
//! configured credential the analyzer runs in simulated mode and returns
//! one of three canned answers after a short delay.

pub mod analyzer;
pub mod config;
pub mod desk;
pub mod prompts;
pub mod response;

pub use analyzer::*;
pub use config::AnalyzerConfig;
pub use desk::{DeskError, FatigueDesk};
pub use prompts::*;
pub use response::*;
