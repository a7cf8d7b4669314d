//! Shared data model, configuration and dataset-level detection for the ad
//! insights engine.

pub mod config;
pub mod context;
pub mod error;
pub mod thresholds;
pub mod types;

pub use config::AppConfig;
pub use context::{CampaignContext, DatasetTotals};
pub use error::{InsightsError, InsightsResult};
pub use thresholds::{Benchmark, Thresholds};
pub use types::{AdRecord, AggregatedGroup, AnalysisOutput, AnalysisSummary, ResultType};
