//! Roll-up of ad rows into per-key groups (ad sets, creatives).

use std::collections::HashMap;

use insights_core::{AdRecord, AggregatedGroup};

/// Running sums for one group. Ratios are only derived in `finish`, once
/// every member has been added.
#[derive(Debug, Default)]
struct GroupAccumulator {
    name: String,
    spend: f64,
    revenue: f64,
    results: u64,
    impressions: u64,
    clicks: u64,
    row_count: usize,
}

impl GroupAccumulator {
    fn add(&mut self, record: &AdRecord) {
        self.spend += record.amount_spent;
        self.revenue += record.revenue();
        self.results += record.results;
        self.impressions += record.impressions;
        self.clicks += record.clicks;
        self.row_count += 1;
    }

    fn finish(self) -> AggregatedGroup {
        let roas = if self.spend > 0.0 {
            self.revenue / self.spend
        } else {
            0.0
        };
        let cpa = if self.results > 0 {
            self.spend / self.results as f64
        } else {
            0.0
        };
        let ctr = if self.impressions > 0 {
            self.clicks as f64 / self.impressions as f64 * 100.0
        } else {
            0.0
        };
        AggregatedGroup {
            name: self.name,
            spend: self.spend,
            revenue: self.revenue,
            results: self.results,
            impressions: self.impressions,
            clicks: self.clicks,
            row_count: self.row_count,
            roas,
            cpa,
            ctr,
        }
    }
}

/// Group `records` by `key_fn`. Groups come out in first-seen key order;
/// blank keys are collected under `Unknown <entity>`.
pub fn aggregate<F>(records: &[AdRecord], key_fn: F, entity: &str) -> Vec<AggregatedGroup>
where
    F: Fn(&AdRecord) -> &str,
{
    let unknown = format!("Unknown {entity}");
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupAccumulator> = Vec::new();

    for record in records {
        let raw = key_fn(record).trim();
        let key = if raw.is_empty() { unknown.as_str() } else { raw };
        let slot = match index.get(key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.to_string(), groups.len());
                groups.push(GroupAccumulator {
                    name: key.to_string(),
                    ..Default::default()
                });
                groups.len() - 1
            }
        };
        groups[slot].add(record);
    }

    groups.into_iter().map(GroupAccumulator::finish).collect()
}

pub fn aggregate_by_ad_set(records: &[AdRecord]) -> Vec<AggregatedGroup> {
    aggregate(records, |r| r.ad_set_name.as_str(), "Ad Set")
}

/// Creatives are keyed by ad name across every ad set and campaign.
pub fn aggregate_by_creative(records: &[AdRecord]) -> Vec<AggregatedGroup> {
    aggregate(records, |r| r.ad_name.as_str(), "Creative")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ad_set: &str, ad: &str, spend: f64, results: u64) -> AdRecord {
        AdRecord {
            ad_set_name: ad_set.into(),
            ad_name: ad.into(),
            amount_spent: spend,
            results,
            ..Default::default()
        }
    }

    #[test]
    fn test_two_rows_same_ad_set() {
        let records = vec![row("SetA", "a1", 50.0, 2), row("SetA", "a2", 70.0, 3)];
        let groups = aggregate_by_ad_set(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "SetA");
        assert_eq!(groups[0].spend, 120.0);
        assert_eq!(groups[0].results, 5);
        assert_eq!(groups[0].cpa, 24.0);
        assert_eq!(groups[0].row_count, 2);
    }

    #[test]
    fn test_first_seen_order() {
        let records = vec![
            row("B", "x", 1.0, 0),
            row("A", "y", 1.0, 0),
            row("B", "z", 1.0, 0),
            row("C", "w", 1.0, 0),
        ];
        let names: Vec<_> = aggregate_by_ad_set(&records)
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_blank_keys_grouped_as_unknown() {
        let records = vec![row("", "", 10.0, 1), row("   ", "", 5.0, 0)];
        let sets = aggregate_by_ad_set(&records);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "Unknown Ad Set");
        assert_eq!(sets[0].spend, 15.0);
        assert_eq!(aggregate_by_creative(&records)[0].name, "Unknown Creative");
    }

    #[test]
    fn test_ratios_use_zero_guards() {
        let groups = aggregate_by_ad_set(&[row("S", "a", 0.0, 0)]);
        assert_eq!(groups[0].roas, 0.0);
        assert_eq!(groups[0].cpa, 0.0);
        assert_eq!(groups[0].ctr, 0.0);
    }

    #[test]
    fn test_revenue_and_ctr() {
        let records = vec![
            AdRecord {
                ad_name: "hero".into(),
                amount_spent: 100.0,
                roas: 2.0,
                impressions: 1000,
                clicks: 10,
                ..Default::default()
            },
            AdRecord {
                ad_name: "hero".into(),
                amount_spent: 300.0,
                roas: 4.0,
                impressions: 1000,
                clicks: 30,
                ..Default::default()
            },
        ];
        let groups = aggregate_by_creative(&records);
        assert_eq!(groups[0].revenue, 1400.0);
        assert_eq!(groups[0].roas, 3.5);
        assert!((groups[0].ctr - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_independent_of_row_order() {
        let records = vec![
            row("A", "1", 12.5, 1),
            row("B", "2", 30.0, 4),
            row("A", "3", 7.5, 2),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = aggregate_by_ad_set(&records);
        let backward = aggregate_by_ad_set(&reversed);
        for group in &forward {
            let other = backward.iter().find(|g| g.name == group.name).unwrap();
            assert_eq!(group.spend, other.spend);
            assert_eq!(group.results, other.results);
        }
        assert_eq!(backward[0].name, "A");
    }
}
