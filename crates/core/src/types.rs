use serde::{Deserialize, Serialize};
use std::fmt;

/// What a row's "results" column counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Purchase,
    Message,
    Lead,
    #[default]
    Generic,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Message => "message",
            Self::Lead => "lead",
            Self::Generic => "generic",
        }
    }

    /// Plural noun used when printing result counts.
    pub fn plural_label(&self) -> &'static str {
        match self {
            Self::Purchase => "purchases",
            Self::Message => "messages",
            Self::Lead => "leads",
            Self::Generic => "results",
        }
    }

    /// Noun matching `count`: "1 lead", "3 leads".
    pub fn count_label(&self, count: u64) -> &'static str {
        if count == 1 {
            match self {
                Self::Purchase => "purchase",
                Self::Message => "message",
                Self::Lead => "lead",
                Self::Generic => "result",
            }
        } else {
            self.plural_label()
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ad row as delivered by the record extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AdRecord {
    pub campaign_name: String,
    pub ad_set_name: String,
    pub ad_name: String,
    pub amount_spent: f64,
    pub impressions: u64,
    pub clicks: u64,
    /// Click-through rate in percent.
    pub ctr: f64,
    /// Cost per click.
    pub cpc: f64,
    pub results: u64,
    pub cost_per_result: f64,
    pub roas: f64,
    pub result_type: ResultType,
}

impl AdRecord {
    /// Revenue implied by the row: `amount_spent * roas`.
    pub fn revenue(&self) -> f64 {
        self.amount_spent * self.roas
    }

    /// Copy of the row with negative or non-finite money fields clamped to zero.
    pub fn sanitized(&self) -> Self {
        Self {
            amount_spent: non_negative(self.amount_spent),
            ctr: non_negative(self.ctr),
            cpc: non_negative(self.cpc),
            cost_per_result: non_negative(self.cost_per_result),
            roas: non_negative(self.roas),
            ..self.clone()
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Rolled-up totals for every row sharing a grouping key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedGroup {
    pub name: String,
    pub spend: f64,
    pub revenue: f64,
    pub results: u64,
    pub impressions: u64,
    pub clicks: u64,
    pub row_count: usize,
    /// `revenue / spend` (0.0 when spend is zero).
    pub roas: f64,
    /// `spend / results` (0.0 when results is zero).
    pub cpa: f64,
    /// `clicks / impressions * 100` (0.0 when impressions is zero).
    pub ctr: f64,
}

/// Headline figures returned next to the narrative.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_spent: f64,
    pub total_revenue: f64,
    pub avg_roas: f64,
    pub avg_cpa: f64,
    pub total_results: u64,
    pub dominant_result_type: ResultType,
}

/// What the presentation layer receives, whichever narrative source produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    pub narrative: String,
    pub summary: AnalysisSummary,
}
