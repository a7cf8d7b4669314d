//! Locale-aware number formatting for report lines.

use insights_core::config::LocaleConfig;

#[derive(Debug, Clone, Copy)]
pub struct NumberFormat<'a> {
    locale: &'a LocaleConfig,
}

impl<'a> NumberFormat<'a> {
    pub fn new(locale: &'a LocaleConfig) -> Self {
        Self { locale }
    }

    /// Money with cents: `$1,234.56`.
    pub fn currency(&self, value: f64) -> String {
        format!("{}{}", self.locale.currency_symbol, self.fixed(value, 2))
    }

    /// Large money totals without cents: `$12,346`.
    pub fn currency_total(&self, value: f64) -> String {
        format!("{}{}", self.locale.currency_symbol, self.fixed(value, 0))
    }

    pub fn count(&self, value: u64) -> String {
        group_digits(&value.to_string(), &self.locale.thousands_separator)
    }

    /// ROAS and similar ratios: `2.35`.
    pub fn ratio(&self, value: f64) -> String {
        self.fixed(value, 2)
    }

    /// Values already expressed in percent: `1.23%`.
    pub fn percent(&self, value: f64) -> String {
        format!("{}%", self.fixed(value, 2))
    }

    fn fixed(&self, value: f64, decimals: usize) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let raw = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match raw.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (raw.as_str(), None),
        };

        let mut out = String::new();
        if value < 0.0 && raw.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, &self.locale.thousands_separator));
        if let Some(frac) = frac_part {
            out.push_str(&self.locale.decimal_separator);
            out.push_str(frac);
        }
        out
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us() -> LocaleConfig {
        LocaleConfig::default()
    }

    fn br() -> LocaleConfig {
        LocaleConfig {
            currency_symbol: "R$ ".into(),
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
        }
    }

    #[test]
    fn test_currency() {
        let locale = us();
        let f = NumberFormat::new(&locale);
        assert_eq!(f.currency(0.0), "$0.00");
        assert_eq!(f.currency(1234.5), "$1,234.50");
        assert_eq!(f.currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_totals_drop_fraction() {
        let locale = us();
        let f = NumberFormat::new(&locale);
        assert_eq!(f.currency_total(1234567.6), "$1,234,568");
        assert_eq!(f.count(1_000), "1,000");
        assert_eq!(f.count(999), "999");
        assert_eq!(f.count(0), "0");
    }

    #[test]
    fn test_ratio_and_percent() {
        let locale = us();
        let f = NumberFormat::new(&locale);
        assert_eq!(f.ratio(1.6), "1.60");
        assert_eq!(f.percent(2.0), "2.00%");
        assert_eq!(f.ratio(f64::NAN), "0.00");
    }

    #[test]
    fn test_other_locale() {
        let locale = br();
        let f = NumberFormat::new(&locale);
        assert_eq!(f.currency(1234.5), "R$ 1.234,50");
        assert_eq!(f.currency_total(2500000.0), "R$ 2.500.000");
    }

    #[test]
    fn test_negative_values() {
        let locale = us();
        let f = NumberFormat::new(&locale);
        assert_eq!(f.ratio(-1234.5), "-1,234.50");
        assert_eq!(f.ratio(-0.001), "0.00");
    }
}
