//! Report sections. Each builder reads only the typed analysis inputs and
//! returns one finished section; the report is their fixed-order sequence.

use insights_core::config::ReportConfig;
use insights_core::{AdRecord, AggregatedGroup, Benchmark, CampaignContext, Thresholds};
use insights_segmentation::SegmentationResult;

use crate::format::NumberFormat;

/// Everything a section builder may read.
pub struct ReportInputs<'a> {
    pub context: &'a CampaignContext,
    pub thresholds: &'a Thresholds,
    pub segments: &'a SegmentationResult<'a>,
    pub config: &'a ReportConfig,
    pub fmt: NumberFormat<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub title: &'static str,
    pub lines: Vec<String>,
}

pub type SectionBuilder = fn(&ReportInputs<'_>) -> ReportSection;

/// Health, kill, scale, test, ad sets, creatives.
pub const SECTIONS: [SectionBuilder; 6] = [
    health_summary,
    kill_list,
    scale_list,
    test_list,
    ad_set_insights,
    creative_insights,
];

// ─── Sections ───────────────────────────────────────────────────────────────

pub fn health_summary(inputs: &ReportInputs<'_>) -> ReportSection {
    let ctx = inputs.context;
    let totals = &ctx.totals;
    let fmt = &inputs.fmt;
    let title = "Account Health";

    if totals.row_count == 0 {
        return ReportSection {
            title,
            lines: vec!["No data to analyze: the report contains no ad rows.".into()],
        };
    }

    let segments = inputs.segments;
    let result_type = ctx.dominant_result_type;
    let mut lines = Vec::new();

    lines.push(if ctx.is_ecommerce {
        format!(
            "Campaign type: e-commerce, judged on ROAS (dominant result: {}).",
            result_type.plural_label()
        )
    } else {
        format!(
            "Campaign type: volume ({}), judged on cost per result.",
            result_type.plural_label()
        )
    });

    lines.push(format!(
        "Spend: {} across {} ads, {} ad sets and {} creatives.",
        fmt.currency_total(totals.total_spent),
        fmt.count(totals.row_count as u64),
        fmt.count(segments.ad_sets.len() as u64),
        fmt.count(segments.creatives.len() as u64),
    ));

    match inputs.thresholds.benchmark {
        Benchmark::Roas { good, bad, average } => lines.push(format!(
            "Revenue: {} at an average ROAS of {} (scale at {} or better, cut below {}).",
            fmt.currency_total(totals.total_revenue),
            fmt.ratio(average),
            fmt.ratio(good),
            fmt.ratio(bad),
        )),
        Benchmark::Cpa { good, bad, average } if totals.total_results > 0 => {
            lines.push(format!(
                "Results: {} {} at an average cost of {} per result (scale at {} or cheaper, cut above {}).",
                fmt.count(totals.total_results),
                result_type.count_label(totals.total_results),
                fmt.currency(average),
                fmt.currency(good),
                fmt.currency(bad),
            ))
        }
        Benchmark::Cpa { .. } => lines.push(
            "Results: 0 results recorded, so no cost per result can be computed yet.".into(),
        ),
    }

    lines.push(format!(
        "Significance floor: an ad needs {} in spend before its performance is judged.",
        fmt.currency(inputs.thresholds.significance_spend)
    ));

    let ctr = if totals.total_impressions > 0 {
        totals.total_clicks as f64 / totals.total_impressions as f64 * 100.0
    } else {
        0.0
    };
    lines.push(format!(
        "Delivery: {} impressions, {} clicks, CTR {}.",
        fmt.count(totals.total_impressions),
        fmt.count(totals.total_clicks),
        fmt.percent(ctr),
    ));

    lines.push(format!(
        "Action items: {} to kill, {} to scale, {} to test.",
        segments.kill_count(),
        segments.winners.len(),
        segments.potentials.len(),
    ));

    ReportSection { title, lines }
}

pub fn kill_list(inputs: &ReportInputs<'_>) -> ReportSection {
    let segments = inputs.segments;
    let fmt = &inputs.fmt;

    let mut lines: Vec<String> = segments
        .kill_list()
        .take(inputs.config.kill_list_limit)
        .map(|record| {
            if record.results == 0 {
                format!(
                    "{} ({}): spent {} with 0 {}. Pause it.",
                    ad_marker(record),
                    ad_set_label(record),
                    fmt.currency(record.amount_spent),
                    record.result_type.plural_label(),
                )
            } else {
                format!(
                    "{} ({}): spent {}, {}, {} {}.",
                    ad_marker(record),
                    ad_set_label(record),
                    fmt.currency(record.amount_spent),
                    row_versus_cutoff(inputs, record),
                    fmt.count(record.results),
                    record.result_type.count_label(record.results),
                )
            }
        })
        .collect();

    push_overflow(&mut lines, segments.kill_count(), inputs.config.kill_list_limit, "ads");
    if lines.is_empty() {
        lines.push(
            "No issues found: no ad is burning budget without results or below the cut-off."
                .into(),
        );
    }

    ReportSection {
        title: "Kill List",
        lines,
    }
}

pub fn scale_list(inputs: &ReportInputs<'_>) -> ReportSection {
    let winners = &inputs.segments.winners;
    let fmt = &inputs.fmt;
    let limit = inputs.config.scale_list_limit;

    let mut lines: Vec<String> = winners
        .iter()
        .take(limit)
        .map(|record| {
            format!(
                "{} ({}): {} on {} spent, {} {}. Increase its budget.",
                ad_marker(record),
                ad_set_label(record),
                row_metric(inputs, record),
                fmt.currency(record.amount_spent),
                fmt.count(record.results),
                record.result_type.count_label(record.results),
            )
        })
        .collect();

    push_overflow(&mut lines, winners.len(), limit, "ads");
    if lines.is_empty() {
        lines.push(
            "No clear winners yet: no ad with significant spend beats the scale threshold.".into(),
        );
    }

    ReportSection {
        title: "Scale List",
        lines,
    }
}

pub fn test_list(inputs: &ReportInputs<'_>) -> ReportSection {
    let potentials = &inputs.segments.potentials;
    let fmt = &inputs.fmt;
    let limit = inputs.config.test_list_limit;

    let mut lines: Vec<String> = potentials
        .iter()
        .take(limit)
        .map(|record| {
            format!(
                "{} ({}): only {} spent (floor {}), {} against the account average of {}, {} {}.",
                ad_marker(record),
                ad_set_label(record),
                fmt.currency(record.amount_spent),
                fmt.currency(inputs.thresholds.significance_spend),
                row_metric(inputs, record),
                benchmark_average(inputs),
                fmt.count(record.results),
                record.result_type.count_label(record.results),
            )
        })
        .collect();

    push_overflow(&mut lines, potentials.len(), limit, "ads");
    if lines.is_empty() {
        lines.push(
            "No under-spent ads are performing at or above the account average yet.".into(),
        );
    }

    ReportSection {
        title: "Test List",
        lines,
    }
}

pub fn ad_set_insights(inputs: &ReportInputs<'_>) -> ReportSection {
    let segments = inputs.segments;
    let limit = inputs.config.adset_limit;
    let mut lines = Vec::new();

    group_lines(
        &mut lines,
        inputs,
        &segments.bad_ad_sets,
        limit,
        "Underperforming",
        |g| g.name.clone(),
        "No ad set is underperforming with significant spend.",
    );
    group_lines(
        &mut lines,
        inputs,
        &segments.good_ad_sets,
        limit,
        "Outperforming",
        |g| g.name.clone(),
        "No ad set is clearly outperforming the account yet.",
    );

    ReportSection {
        title: "Ad Set Insights",
        lines,
    }
}

pub fn creative_insights(inputs: &ReportInputs<'_>) -> ReportSection {
    let segments = inputs.segments;
    let limit = inputs.config.creative_limit;
    let mut lines = Vec::new();

    group_lines(
        &mut lines,
        inputs,
        &segments.best_creatives,
        limit,
        "Best creative",
        |g| format!("`{}`", g.name),
        "No creative clearly beats the account average yet.",
    );
    group_lines(
        &mut lines,
        inputs,
        &segments.worst_creatives,
        limit,
        "Worst creative",
        |g| format!("`{}`", g.name),
        "No creative is clearly wasting budget.",
    );

    ReportSection {
        title: "Creative Insights",
        lines,
    }
}

// ─── Line helpers ───────────────────────────────────────────────────────────

/// Ad names are wrapped in backticks so the UI can link them.
fn ad_marker(record: &AdRecord) -> String {
    let name = record.ad_name.trim();
    if name.is_empty() {
        "`Unknown Creative`".to_string()
    } else {
        format!("`{name}`")
    }
}

fn ad_set_label(record: &AdRecord) -> &str {
    let name = record.ad_set_name.trim();
    if name.is_empty() {
        "Unknown Ad Set"
    } else {
        name
    }
}

fn row_metric(inputs: &ReportInputs<'_>, record: &AdRecord) -> String {
    match inputs.thresholds.benchmark {
        Benchmark::Roas { .. } => format!("ROAS {}", inputs.fmt.ratio(record.roas)),
        Benchmark::Cpa { .. } => format!(
            "{} per result",
            inputs.fmt.currency(record.cost_per_result)
        ),
    }
}

fn row_versus_cutoff(inputs: &ReportInputs<'_>, record: &AdRecord) -> String {
    let fmt = &inputs.fmt;
    match inputs.thresholds.benchmark {
        Benchmark::Roas { bad, .. } => format!(
            "ROAS {} against a cut-off of {}",
            fmt.ratio(record.roas),
            fmt.ratio(bad)
        ),
        Benchmark::Cpa { bad, .. } => format!(
            "{} per result against a limit of {}",
            fmt.currency(record.cost_per_result),
            fmt.currency(bad)
        ),
    }
}

fn benchmark_average(inputs: &ReportInputs<'_>) -> String {
    match inputs.thresholds.benchmark {
        Benchmark::Roas { average, .. } => inputs.fmt.ratio(average),
        Benchmark::Cpa { average, .. } => inputs.fmt.currency(average),
    }
}

fn group_metric(inputs: &ReportInputs<'_>, group: &AggregatedGroup) -> String {
    let fmt = &inputs.fmt;
    let label = inputs.context.dominant_result_type.count_label(group.results);
    let performance = match inputs.thresholds.benchmark {
        Benchmark::Roas { .. } => format!("ROAS {}", fmt.ratio(group.roas)),
        Benchmark::Cpa { .. } if group.results > 0 => format!("CPA {}", fmt.currency(group.cpa)),
        Benchmark::Cpa { .. } => "no results".to_string(),
    };
    format!(
        "spent {}, {}, {} {}, CTR {}",
        fmt.currency(group.spend),
        performance,
        fmt.count(group.results),
        label,
        fmt.percent(group.ctr),
    )
}

fn group_lines(
    lines: &mut Vec<String>,
    inputs: &ReportInputs<'_>,
    groups: &[AggregatedGroup],
    limit: usize,
    heading: &str,
    name: impl Fn(&AggregatedGroup) -> String,
    fallback: &str,
) {
    if groups.is_empty() {
        lines.push(fallback.to_string());
        return;
    }
    for group in groups.iter().take(limit) {
        lines.push(format!(
            "{heading}: {}: {}.",
            name(group),
            group_metric(inputs, group)
        ));
    }
    if groups.len() > limit {
        lines.push(format!("...and {} more.", groups.len() - limit));
    }
}

fn push_overflow(lines: &mut Vec<String>, total: usize, limit: usize, noun: &str) {
    if total > limit {
        lines.push(format!("...and {} more {noun}.", total - limit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::config::ThresholdConfig;
    use insights_core::ResultType;
    use insights_segmentation::SegmentationEngine;

    fn with_inputs<T>(records: &[AdRecord], check: impl FnOnce(&ReportInputs<'_>) -> T) -> T {
        let rules = ThresholdConfig::default();
        let report = ReportConfig::default();
        let context = CampaignContext::detect(records, &rules);
        let thresholds = Thresholds::compute(&context, &rules);
        let segments = SegmentationEngine::new(&thresholds, &rules).segment(records, &context);
        let inputs = ReportInputs {
            context: &context,
            thresholds: &thresholds,
            segments: &segments,
            config: &report,
            fmt: NumberFormat::new(&report.locale),
        };
        check(&inputs)
    }

    fn purchase(ad: &str, ad_set: &str, spend: f64, results: u64, roas: f64) -> AdRecord {
        AdRecord {
            ad_name: ad.into(),
            ad_set_name: ad_set.into(),
            amount_spent: spend,
            impressions: 20_000,
            clicks: 400,
            results,
            roas,
            result_type: ResultType::Purchase,
            ..Default::default()
        }
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let titles: Vec<_> = with_inputs(&[], |inputs| {
            SECTIONS.iter().map(|b| b(inputs).title).collect()
        });
        assert_eq!(
            titles,
            vec![
                "Account Health",
                "Kill List",
                "Scale List",
                "Test List",
                "Ad Set Insights",
                "Creative Insights"
            ]
        );
    }

    #[test]
    fn test_every_section_has_a_line_when_empty() {
        with_inputs(&[], |inputs| {
            for build in SECTIONS {
                assert!(!build(inputs).lines.is_empty());
            }
        });
    }

    #[test]
    fn test_health_summary_ecommerce_figures() {
        let records = vec![
            purchase("Hero", "Prospecting", 1000.0, 20, 3.0),
            purchase("Dud", "Retargeting", 1000.0, 2, 0.2),
        ];
        let section = with_inputs(&records, health_summary);
        let text = section.lines.join("\n");
        assert!(text.contains("Campaign type: e-commerce"));
        assert!(text.contains("Spend: $2,000 across 2 ads, 2 ad sets and 2 creatives."));
        assert!(text.contains("Revenue: $3,200 at an average ROAS of 1.60"));
        assert!(text.contains("scale at 1.92 or better, cut below 1.28"));
        assert!(text.contains("CTR 2.00%"));
        assert!(text.contains("Action items: 1 to kill, 1 to scale, 0 to test."));
    }

    #[test]
    fn test_bleeder_line_cites_cutoff() {
        let records = vec![
            purchase("Hero", "Prospecting", 1000.0, 20, 3.0),
            purchase("Dud", "Retargeting", 1000.0, 2, 0.2),
        ];
        let section = with_inputs(&records, kill_list);
        assert_eq!(
            section.lines,
            vec!["`Dud` (Retargeting): spent $1,000.00, ROAS 0.20 against a cut-off of 1.28, 2 purchases."]
        );
    }

    #[test]
    fn test_creative_names_are_marked_ad_sets_are_not() {
        let records = vec![
            purchase("Hero", "Prospecting", 1000.0, 20, 3.0),
            purchase("Dud", "Retargeting", 1000.0, 2, 0.2),
        ];
        let adsets = with_inputs(&records, ad_set_insights);
        assert!(adsets.lines[0].starts_with("Underperforming: Retargeting: spent $1,000.00"));
        assert!(adsets.lines[1].starts_with("Outperforming: Prospecting:"));

        let creatives = with_inputs(&records, creative_insights);
        assert!(creatives.lines[0].starts_with("Best creative: `Hero`: spent $1,000.00, ROAS 3.00"));
        assert!(creatives.lines[1].starts_with("Worst creative: `Dud`"));
    }

    #[test]
    fn test_potential_line() {
        let records = vec![
            purchase("Big", "S", 1000.0, 10, 2.0),
            purchase("Small", "S", 20.0, 1, 2.5),
        ];
        let section = with_inputs(&records, test_list);
        assert_eq!(section.lines.len(), 1);
        assert!(section.lines[0].starts_with("`Small` (S): only $20.00 spent"));
        assert!(section.lines[0].contains("ROAS 2.50 against the account average of 2.01"));
    }
}
