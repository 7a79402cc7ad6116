//! Data models for Verdant
//!
//! Core data structures for analysis options and analysis results.

mod options;
mod report;

// Re-export all public types to keep the public API in one place
pub use options::{AnalysisOptions, RoiMode, RoiSpec};
pub use report::{AnalysisRecord, AnalysisReport};
