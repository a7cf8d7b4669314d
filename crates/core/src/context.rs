//! Campaign context detection: revenue-driven vs volume-driven accounts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::types::{AdRecord, AnalysisSummary, ResultType};

/// Dataset-wide sums and averages every later stage reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetTotals {
    pub row_count: usize,
    pub total_spent: f64,
    pub total_revenue: f64,
    pub total_results: u64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    /// `total_revenue / total_spent` (0.0 when nothing was spent).
    pub avg_roas: f64,
    /// `total_spent / total_results` (0.0 when there are no results).
    pub avg_cpa: f64,
}

impl DatasetTotals {
    pub fn from_records(records: &[AdRecord]) -> Self {
        let mut totals = Self {
            row_count: records.len(),
            ..Default::default()
        };
        for record in records {
            totals.total_spent += record.amount_spent;
            totals.total_revenue += record.revenue();
            totals.total_results += record.results;
            totals.total_impressions += record.impressions;
            totals.total_clicks += record.clicks;
        }
        totals.avg_roas = if totals.total_spent > 0.0 {
            totals.total_revenue / totals.total_spent
        } else {
            0.0
        };
        totals.avg_cpa = if totals.total_results > 0 {
            totals.total_spent / totals.total_results as f64
        } else {
            0.0
        };
        totals
    }
}

/// Whether the account is judged on ROAS or on cost per result. Built once
/// per analysis and passed by reference to every classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignContext {
    pub is_ecommerce: bool,
    pub dominant_result_type: ResultType,
    pub totals: DatasetTotals,
}

impl CampaignContext {
    pub fn detect(records: &[AdRecord], config: &ThresholdConfig) -> Self {
        let totals = DatasetTotals::from_records(records);
        let dominant_result_type = dominant_result_type(records);
        let is_ecommerce = totals.avg_roas > config.ecommerce_roas_floor
            || dominant_result_type == ResultType::Purchase;

        debug!(
            rows = totals.row_count,
            avg_roas = totals.avg_roas,
            avg_cpa = totals.avg_cpa,
            %dominant_result_type,
            is_ecommerce,
            "campaign context detected"
        );

        Self {
            is_ecommerce,
            dominant_result_type,
            totals,
        }
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            total_spent: self.totals.total_spent,
            total_revenue: self.totals.total_revenue,
            avg_roas: self.totals.avg_roas,
            avg_cpa: self.totals.avg_cpa,
            total_results: self.totals.total_results,
            dominant_result_type: self.dominant_result_type,
        }
    }
}

/// Most frequent result type; on a tie the type seen first wins.
fn dominant_result_type(records: &[AdRecord]) -> ResultType {
    let mut counts: Vec<(ResultType, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(t, _)| *t == record.result_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.result_type, 1)),
        }
    }

    let mut best: Option<(ResultType, usize)> = None;
    for (result_type, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((result_type, count));
        }
    }
    best.map(|(t, _)| t).unwrap_or_default()
}
