//! Bucket membership rules for rows and aggregated groups.

use std::cmp::Ordering;

use insights_core::config::ThresholdConfig;
use insights_core::{AdRecord, AggregatedGroup, Benchmark, Thresholds};

/// The rule set for one analysis run: computed thresholds plus the
/// configured multipliers that are applied directly to averages.
#[derive(Debug, Clone, Copy)]
pub struct Criteria<'a> {
    pub thresholds: &'a Thresholds,
    pub rules: &'a ThresholdConfig,
}

impl<'a> Criteria<'a> {
    pub fn new(thresholds: &'a Thresholds, rules: &'a ThresholdConfig) -> Self {
        Self { thresholds, rules }
    }

    fn floor(&self) -> f64 {
        self.thresholds.significance_spend
    }

    // ─── Row-level ──────────────────────────────────────────────────────────

    /// Meaningful spend and nothing to show for it.
    pub fn is_zombie(&self, record: &AdRecord) -> bool {
        record.results == 0 && record.amount_spent > self.floor() * self.rules.zombie_spend_fraction
    }

    pub fn is_bleeder(&self, record: &AdRecord) -> bool {
        if record.results == 0 || record.amount_spent < self.floor() {
            return false;
        }
        match self.thresholds.benchmark {
            Benchmark::Roas { bad, .. } => record.roas < bad,
            Benchmark::Cpa { bad, .. } => record.cost_per_result > bad,
        }
    }

    pub fn is_winner(&self, record: &AdRecord) -> bool {
        if record.results == 0 || record.amount_spent < self.floor() {
            return false;
        }
        match self.thresholds.benchmark {
            Benchmark::Roas { good, .. } => record.roas >= good,
            Benchmark::Cpa { good, .. } => record.cost_per_result <= good,
        }
    }

    /// Under the significance floor but already at or above average.
    pub fn is_potential(&self, record: &AdRecord) -> bool {
        if record.results == 0 || record.amount_spent >= self.floor() {
            return false;
        }
        match self.thresholds.benchmark {
            Benchmark::Roas { average, .. } => record.roas >= average,
            Benchmark::Cpa { average, .. } => record.cost_per_result <= average,
        }
    }

    // ─── Group-level ────────────────────────────────────────────────────────

    pub fn is_bad_ad_set(&self, group: &AggregatedGroup) -> bool {
        if group.spend < self.floor() {
            return false;
        }
        match self.thresholds.benchmark {
            Benchmark::Roas { average, .. } => {
                group.roas < average * self.rules.adset_bad_roas_multiplier
            }
            Benchmark::Cpa { bad, .. } => group.results == 0 || group.cpa > bad,
        }
    }

    pub fn is_good_ad_set(&self, group: &AggregatedGroup) -> bool {
        if group.results == 0 {
            return false;
        }
        match self.thresholds.benchmark {
            Benchmark::Roas { average, .. } => {
                group.roas > average * self.rules.adset_good_roas_multiplier
            }
            Benchmark::Cpa { good, .. } => group.cpa < good,
        }
    }

    /// A zero-result creative has a placeholder CPA of 0 and never counts as
    /// cheapest.
    pub fn is_best_creative(&self, group: &AggregatedGroup) -> bool {
        if group.spend <= self.floor() {
            return false;
        }
        match self.thresholds.benchmark {
            Benchmark::Roas { average, .. } => group.roas > average,
            Benchmark::Cpa { average, .. } => group.results > 0 && group.cpa < average,
        }
    }

    pub fn is_worst_creative(&self, group: &AggregatedGroup) -> bool {
        if group.spend <= self.floor() {
            return false;
        }
        match self.thresholds.benchmark {
            Benchmark::Roas { bad, .. } => group.roas < bad,
            Benchmark::Cpa { bad, .. } => group.cpa > bad,
        }
    }
}

// ─── Orderings ──────────────────────────────────────────────────────────────

/// Highest spend first.
pub fn by_spend_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Best performer first under the active benchmark: ROAS descending or cost
/// ascending.
pub fn by_performance(benchmark: &Benchmark, a: (f64, f64), b: (f64, f64)) -> Ordering {
    let ((a_roas, a_cost), (b_roas, b_cost)) = (a, b);
    match benchmark {
        Benchmark::Roas { .. } => b_roas.total_cmp(&a_roas),
        Benchmark::Cpa { .. } => a_cost.total_cmp(&b_cost),
    }
}
