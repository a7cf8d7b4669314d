//! Report composition for the ad insights engine: section builders,
//! number formatting and the end-to-end analysis pipeline.

pub mod analyzer;
pub mod format;
pub mod report_builder;
pub mod sections;

pub use analyzer::{InsightsEngine, NarrativeSource};
pub use format::NumberFormat;
pub use report_builder::{build_sections, compose, render};
pub use sections::{ReportInputs, ReportSection};
