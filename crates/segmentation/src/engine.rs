//! Segmentation engine: sorts rows, ad sets and creatives into kill, scale
//! and test buckets.

use serde::Serialize;
use tracing::debug;

use insights_core::config::ThresholdConfig;
use insights_core::{AdRecord, AggregatedGroup, CampaignContext, Thresholds};

use crate::aggregator::{aggregate_by_ad_set, aggregate_by_creative};
use crate::predicates::{by_performance, by_spend_desc, Criteria};

/// Every bucket for one run. Row buckets borrow from the input; group
/// buckets are sorted copies of the aggregations kept alongside them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SegmentationResult<'a> {
    pub zombies: Vec<&'a AdRecord>,
    pub bleeders: Vec<&'a AdRecord>,
    pub winners: Vec<&'a AdRecord>,
    pub potentials: Vec<&'a AdRecord>,
    pub ad_sets: Vec<AggregatedGroup>,
    pub creatives: Vec<AggregatedGroup>,
    pub good_ad_sets: Vec<AggregatedGroup>,
    pub bad_ad_sets: Vec<AggregatedGroup>,
    pub best_creatives: Vec<AggregatedGroup>,
    pub worst_creatives: Vec<AggregatedGroup>,
}

impl<'a> SegmentationResult<'a> {
    /// Zombies first, then bleeders.
    pub fn kill_list(&self) -> impl Iterator<Item = &'a AdRecord> + '_ {
        self.zombies.iter().chain(self.bleeders.iter()).copied()
    }

    pub fn kill_count(&self) -> usize {
        self.zombies.len() + self.bleeders.len()
    }
}

pub struct SegmentationEngine<'a> {
    criteria: Criteria<'a>,
}

impl<'a> SegmentationEngine<'a> {
    pub fn new(thresholds: &'a Thresholds, rules: &'a ThresholdConfig) -> Self {
        Self {
            criteria: Criteria::new(thresholds, rules),
        }
    }

    pub fn segment<'r>(
        &self,
        records: &'r [AdRecord],
        context: &CampaignContext,
    ) -> SegmentationResult<'r> {
        let c = &self.criteria;
        let benchmark = &c.thresholds.benchmark;

        let pick = |keep: fn(&Criteria<'a>, &AdRecord) -> bool| -> Vec<&'r AdRecord> {
            records.iter().filter(|r| keep(c, *r)).collect()
        };

        let mut zombies = pick(Criteria::is_zombie);
        let mut bleeders = pick(Criteria::is_bleeder);
        let mut winners = pick(Criteria::is_winner);
        let mut potentials = pick(Criteria::is_potential);

        zombies.sort_by(|a, b| by_spend_desc(a.amount_spent, b.amount_spent));
        bleeders.sort_by(|a, b| by_spend_desc(a.amount_spent, b.amount_spent));
        let row_perf = |r: &AdRecord| (r.roas, r.cost_per_result);
        winners.sort_by(|a, b| by_performance(benchmark, row_perf(*a), row_perf(*b)));
        potentials.sort_by(|a, b| by_performance(benchmark, row_perf(*a), row_perf(*b)));

        let ad_sets = aggregate_by_ad_set(records);
        let creatives = aggregate_by_creative(records);

        let select =
            |groups: &[AggregatedGroup], keep: fn(&Criteria<'a>, &AggregatedGroup) -> bool| {
                groups
                    .iter()
                    .filter(|g| keep(c, *g))
                    .cloned()
                    .collect::<Vec<_>>()
            };
        let group_perf = |g: &AggregatedGroup| (g.roas, g.cpa);

        let mut bad_ad_sets = select(&ad_sets, Criteria::is_bad_ad_set);
        let mut good_ad_sets = select(&ad_sets, Criteria::is_good_ad_set);
        let mut best_creatives = select(&creatives, Criteria::is_best_creative);
        let mut worst_creatives = select(&creatives, Criteria::is_worst_creative);

        bad_ad_sets.sort_by(|a, b| by_spend_desc(a.spend, b.spend));
        good_ad_sets.sort_by(|a, b| by_performance(benchmark, group_perf(a), group_perf(b)));
        best_creatives.sort_by(|a, b| by_performance(benchmark, group_perf(a), group_perf(b)));
        worst_creatives.sort_by(|a, b| by_spend_desc(a.spend, b.spend));

        debug!(
            rows = records.len(),
            is_ecommerce = context.is_ecommerce,
            zombies = zombies.len(),
            bleeders = bleeders.len(),
            winners = winners.len(),
            potentials = potentials.len(),
            ad_sets = ad_sets.len(),
            creatives = creatives.len(),
            "segmentation complete"
        );

        SegmentationResult {
            zombies,
            bleeders,
            winners,
            potentials,
            ad_sets,
            creatives,
            good_ad_sets,
            bad_ad_sets,
            best_creatives,
            worst_creatives,
        }
    }
}
