//! Analysis pipeline: context → thresholds → segmentation → narrative.

use tracing::info;

use insights_core::{
    AdRecord, AnalysisOutput, AppConfig, CampaignContext, InsightsResult, Thresholds,
};
use insights_segmentation::SegmentationEngine;

use crate::format::NumberFormat;
use crate::report_builder::compose;
use crate::sections::ReportInputs;

/// Anything that turns ad rows into an `AnalysisOutput`. The rule-based
/// engine below is one source; a model-backed generator is another, and the
/// presentation layer treats them interchangeably.
pub trait NarrativeSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &str;

    fn generate(&self, records: &[AdRecord]) -> InsightsResult<AnalysisOutput>;
}

/// Deterministic rule-based analyzer. Holds only configuration; every call
/// works on its own copy of the rows.
#[derive(Debug, Clone, Default)]
pub struct InsightsEngine {
    config: AppConfig,
}

impl InsightsEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, records: &[AdRecord]) -> AnalysisOutput {
        let records: Vec<AdRecord> = records.iter().map(AdRecord::sanitized).collect();
        let rules = &self.config.thresholds;

        let context = CampaignContext::detect(&records, rules);
        let thresholds = Thresholds::compute(&context, rules);
        let segments = SegmentationEngine::new(&thresholds, rules).segment(&records, &context);

        let inputs = ReportInputs {
            context: &context,
            thresholds: &thresholds,
            segments: &segments,
            config: &self.config.report,
            fmt: NumberFormat::new(&self.config.report.locale),
        };
        let narrative = compose(&inputs);

        info!(
            rows = records.len(),
            total_spent = context.totals.total_spent,
            is_ecommerce = context.is_ecommerce,
            dominant_result_type = %context.dominant_result_type,
            to_kill = segments.kill_count(),
            to_scale = segments.winners.len(),
            to_test = segments.potentials.len(),
            "analysis complete"
        );

        AnalysisOutput {
            narrative,
            summary: context.summary(),
        }
    }
}

impl NarrativeSource for InsightsEngine {
    fn name(&self) -> &str {
        "rules"
    }

    fn generate(&self, records: &[AdRecord]) -> InsightsResult<AnalysisOutput> {
        Ok(self.analyze(records))
    }
}
