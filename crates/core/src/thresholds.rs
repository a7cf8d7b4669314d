//! Dynamic thresholds derived from the account's own averages.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::context::CampaignContext;

/// The active performance yardstick. Revenue-driven accounts are judged on
/// ROAS (higher is better), volume-driven ones on cost per result (lower is
/// better). `good` is always the more profitable side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", rename_all = "snake_case")]
pub enum Benchmark {
    Roas { good: f64, bad: f64, average: f64 },
    Cpa { good: f64, bad: f64, average: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub benchmark: Benchmark,
    /// Spend an ad must reach before its ratios are trusted.
    pub significance_spend: f64,
}

impl Thresholds {
    pub fn compute(context: &CampaignContext, config: &ThresholdConfig) -> Self {
        let totals = &context.totals;
        let avg_cpa = totals.avg_cpa;

        let benchmark = if context.is_ecommerce {
            Benchmark::Roas {
                good: totals.avg_roas * config.roas_good_multiplier,
                bad: totals.avg_roas * config.roas_bad_multiplier,
                average: totals.avg_roas,
            }
        } else {
            Benchmark::Cpa {
                good: if avg_cpa > 0.0 {
                    avg_cpa * config.cpa_good_multiplier
                } else {
                    0.0
                },
                bad: if avg_cpa > 0.0 {
                    avg_cpa * config.cpa_bad_multiplier
                } else {
                    0.0
                },
                average: avg_cpa,
            }
        };

        // Without a usable CPA fall back to average spend per row.
        let significance_spend = if avg_cpa > 0.0 {
            avg_cpa
        } else {
            totals.total_spent / totals.row_count.max(1) as f64
        };

        debug!(?benchmark, significance_spend, "thresholds computed");

        Self {
            benchmark,
            significance_spend,
        }
    }

    pub fn roas_good(&self) -> f64 {
        match self.benchmark {
            Benchmark::Roas { good, .. } => good,
            Benchmark::Cpa { .. } => 0.0,
        }
    }

    pub fn roas_bad(&self) -> f64 {
        match self.benchmark {
            Benchmark::Roas { bad, .. } => bad,
            Benchmark::Cpa { .. } => 0.0,
        }
    }

    pub fn cpa_good(&self) -> f64 {
        match self.benchmark {
            Benchmark::Cpa { good, .. } => good,
            Benchmark::Roas { .. } => 0.0,
        }
    }

    pub fn cpa_bad(&self) -> f64 {
        match self.benchmark {
            Benchmark::Cpa { bad, .. } => bad,
            Benchmark::Roas { .. } => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DatasetTotals;
    use crate::types::ResultType;

    fn context(is_ecommerce: bool, totals: DatasetTotals) -> CampaignContext {
        CampaignContext {
            is_ecommerce,
            dominant_result_type: ResultType::Generic,
            totals,
        }
    }

    #[test]
    fn test_roas_thresholds() {
        let ctx = context(
            true,
            DatasetTotals {
                row_count: 2,
                total_spent: 2000.0,
                total_results: 12,
                avg_roas: 1.6,
                avg_cpa: 2000.0 / 12.0,
                ..Default::default()
            },
        );
        let t = Thresholds::compute(&ctx, &ThresholdConfig::default());
        assert!((t.roas_good() - 1.92).abs() < 1e-9);
        assert!((t.roas_bad() - 1.28).abs() < 1e-9);
        assert!(t.roas_good() >= t.roas_bad());
        assert_eq!(t.cpa_good(), 0.0);
        assert!((t.significance_spend - 2000.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_cpa_thresholds() {
        let ctx = context(
            false,
            DatasetTotals {
                row_count: 4,
                total_spent: 200.0,
                total_results: 10,
                avg_cpa: 20.0,
                ..Default::default()
            },
        );
        let t = Thresholds::compute(&ctx, &ThresholdConfig::default());
        assert_eq!(
            t.benchmark,
            Benchmark::Cpa {
                good: 16.0,
                bad: 26.0,
                average: 20.0
            }
        );
        assert!(t.cpa_good() <= t.cpa_bad());
        assert_eq!(t.significance_spend, 20.0);
    }

    #[test]
    fn test_significance_falls_back_to_spend_per_row() {
        let ctx = context(
            false,
            DatasetTotals {
                row_count: 4,
                total_spent: 400.0,
                ..Default::default()
            },
        );
        let t = Thresholds::compute(&ctx, &ThresholdConfig::default());
        assert_eq!(t.cpa_good(), 0.0);
        assert_eq!(t.cpa_bad(), 0.0);
        assert_eq!(t.significance_spend, 100.0);
    }

    #[test]
    fn test_empty_dataset_has_zero_floor() {
        let ctx = context(false, DatasetTotals::default());
        let t = Thresholds::compute(&ctx, &ThresholdConfig::default());
        assert_eq!(t.significance_spend, 0.0);
    }
}
