//! Ad segmentation: per-key aggregation and kill / scale / test
//! classification of rows, ad sets and creatives.

pub mod aggregator;
pub mod engine;
pub mod predicates;

pub use aggregator::{aggregate, aggregate_by_ad_set, aggregate_by_creative};
pub use engine::{SegmentationEngine, SegmentationResult};
pub use predicates::Criteria;
