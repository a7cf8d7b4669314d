use serde::Deserialize;
use std::path::Path;

use crate::error::{InsightsError, InsightsResult};

/// Root configuration. Loaded from an optional TOML file and environment
/// variables with the prefix `AD_INSIGHTS__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Multipliers applied to the dataset averages. Defaults follow the latest
/// tuning of the rule set.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    /// Average ROAS above which a dataset counts as e-commerce.
    #[serde(default = "default_ecommerce_roas_floor")]
    pub ecommerce_roas_floor: f64,
    #[serde(default = "default_roas_good_multiplier")]
    pub roas_good_multiplier: f64,
    #[serde(default = "default_roas_bad_multiplier")]
    pub roas_bad_multiplier: f64,
    #[serde(default = "default_cpa_good_multiplier")]
    pub cpa_good_multiplier: f64,
    #[serde(default = "default_cpa_bad_multiplier")]
    pub cpa_bad_multiplier: f64,
    /// Share of the significance floor a zero-result ad must exceed.
    #[serde(default = "default_zombie_spend_fraction")]
    pub zombie_spend_fraction: f64,
    #[serde(default = "default_adset_good_roas_multiplier")]
    pub adset_good_roas_multiplier: f64,
    #[serde(default = "default_adset_bad_roas_multiplier")]
    pub adset_bad_roas_multiplier: f64,
}

/// Display limits and number formatting for the narrative.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_kill_list_limit")]
    pub kill_list_limit: usize,
    #[serde(default = "default_scale_list_limit")]
    pub scale_list_limit: usize,
    #[serde(default = "default_test_list_limit")]
    pub test_list_limit: usize,
    #[serde(default = "default_group_limit")]
    pub adset_limit: usize,
    #[serde(default = "default_group_limit")]
    pub creative_limit: usize,
    #[serde(default)]
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
}

// Default functions
fn default_ecommerce_roas_floor() -> f64 {
    0.5
}
fn default_roas_good_multiplier() -> f64 {
    1.2
}
fn default_roas_bad_multiplier() -> f64 {
    0.8
}
fn default_cpa_good_multiplier() -> f64 {
    0.8
}
fn default_cpa_bad_multiplier() -> f64 {
    1.3
}
fn default_zombie_spend_fraction() -> f64 {
    0.5
}
fn default_adset_good_roas_multiplier() -> f64 {
    1.2
}
fn default_adset_bad_roas_multiplier() -> f64 {
    0.8
}
fn default_kill_list_limit() -> usize {
    5
}
fn default_scale_list_limit() -> usize {
    5
}
fn default_test_list_limit() -> usize {
    3
}
fn default_group_limit() -> usize {
    3
}
fn default_currency_symbol() -> String {
    "$".to_string()
}
fn default_thousands_separator() -> String {
    ",".to_string()
}
fn default_decimal_separator() -> String {
    ".".to_string()
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            ecommerce_roas_floor: default_ecommerce_roas_floor(),
            roas_good_multiplier: default_roas_good_multiplier(),
            roas_bad_multiplier: default_roas_bad_multiplier(),
            cpa_good_multiplier: default_cpa_good_multiplier(),
            cpa_bad_multiplier: default_cpa_bad_multiplier(),
            zombie_spend_fraction: default_zombie_spend_fraction(),
            adset_good_roas_multiplier: default_adset_good_roas_multiplier(),
            adset_bad_roas_multiplier: default_adset_bad_roas_multiplier(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            kill_list_limit: default_kill_list_limit(),
            scale_list_limit: default_scale_list_limit(),
            test_list_limit: default_test_list_limit(),
            adset_limit: default_group_limit(),
            creative_limit: default_group_limit(),
            locale: LocaleConfig::default(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

impl ReportConfig {
    /// Apply one cap to every display list.
    pub fn with_uniform_limit(mut self, limit: usize) -> Self {
        self.kill_list_limit = limit;
        self.scale_list_limit = limit;
        self.test_list_limit = limit;
        self.adset_limit = limit;
        self.creative_limit = limit;
        self
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then environment
    /// variables (`AD_INSIGHTS__THRESHOLDS__CPA_BAD_MULTIPLIER=1.5`).
    pub fn load(file: Option<&Path>) -> InsightsResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("AD_INSIGHTS")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would invert good/bad thresholds or hide every list.
    pub fn validate(&self) -> InsightsResult<()> {
        let t = &self.thresholds;
        let multipliers = [
            ("ecommerce_roas_floor", t.ecommerce_roas_floor),
            ("roas_good_multiplier", t.roas_good_multiplier),
            ("roas_bad_multiplier", t.roas_bad_multiplier),
            ("cpa_good_multiplier", t.cpa_good_multiplier),
            ("cpa_bad_multiplier", t.cpa_bad_multiplier),
            ("zombie_spend_fraction", t.zombie_spend_fraction),
            ("adset_good_roas_multiplier", t.adset_good_roas_multiplier),
            ("adset_bad_roas_multiplier", t.adset_bad_roas_multiplier),
        ];
        for (name, value) in multipliers {
            if !value.is_finite() || value < 0.0 {
                return Err(InsightsError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if t.roas_good_multiplier < t.roas_bad_multiplier {
            return Err(InsightsError::Config(
                "roas_good_multiplier must not be below roas_bad_multiplier".into(),
            ));
        }
        if t.adset_good_roas_multiplier < t.adset_bad_roas_multiplier {
            return Err(InsightsError::Config(
                "adset_good_roas_multiplier must not be below adset_bad_roas_multiplier".into(),
            ));
        }
        if t.cpa_good_multiplier > t.cpa_bad_multiplier {
            return Err(InsightsError::Config(
                "cpa_good_multiplier must not exceed cpa_bad_multiplier".into(),
            ));
        }

        let r = &self.report;
        let limits = [
            ("kill_list_limit", r.kill_list_limit),
            ("scale_list_limit", r.scale_list_limit),
            ("test_list_limit", r.test_list_limit),
            ("adset_limit", r.adset_limit),
            ("creative_limit", r.creative_limit),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, limit)| *limit == 0) {
            return Err(InsightsError::Config(format!("{name} must be at least 1")));
        }
        Ok(())
    }
}
