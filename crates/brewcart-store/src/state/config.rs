//! # Store Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BREWCART_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no lock.

use brewcart_core::Money;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{StoreError, StoreResult};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/";
const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:8080/media/";

/// Decimal places held by `Money`.
const CENT_DECIMALS: u8 = 2;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Storefront service root; endpoint paths are joined onto it.
    pub api_base_url: Url,

    /// Prefix for product image references.
    pub media_base_url: Url,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Decimal places shown, at most 2. Fewer places round the cents.
    pub currency_decimals: u8,
}

impl Default for StoreConfig {
    /// Development defaults: local service on port 8080, USD.
    fn default() -> Self {
        StoreConfig {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default API URL is valid"),
            media_base_url: Url::parse(DEFAULT_MEDIA_BASE_URL)
                .expect("default media URL is valid"),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl StoreConfig {
    /// Builds the configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BREWCART_API_BASE_URL`: storefront service root
    /// - `BREWCART_MEDIA_BASE_URL`: image host prefix
    /// - `BREWCART_CURRENCY_SYMBOL`: display symbol
    ///
    /// An unparsable URL is an error rather than a silent fallback.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StoreConfig::default();

        if let Some(raw) = lookup("BREWCART_API_BASE_URL") {
            config.api_base_url = parse_base_url("BREWCART_API_BASE_URL", &raw)?;
        }

        if let Some(raw) = lookup("BREWCART_MEDIA_BASE_URL") {
            config.media_base_url = parse_base_url("BREWCART_MEDIA_BASE_URL", &raw)?;
        }

        if let Some(symbol) = lookup("BREWCART_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        Ok(config)
    }

    /// Formats an amount for display.
    ///
    /// ```rust
    /// use brewcart_core::Money;
    /// use brewcart_store::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = self.currency_decimals.min(CENT_DECIMALS);
        // Money is always in hundredths; drop digits the currency doesn't show.
        let step = 10_u64.pow(u32::from(CENT_DECIMALS - decimals));
        let units = (amount.cents().unsigned_abs() + step / 2) / step;
        let sign = if amount.cents() < 0 && units > 0 { "-" } else { "" };

        if decimals == 0 {
            return format!("{}{}{}", sign, self.currency_symbol, units);
        }
        let scale = 10_u64.pow(u32::from(decimals));
        format!(
            "{}{}{}.{:0width$}",
            sign,
            self.currency_symbol,
            units / scale,
            units % scale,
            width = usize::from(decimals)
        )
    }
}

/// Parses a base URL and guarantees a trailing slash, so joining a relative
/// path appends to it instead of replacing the last segment.
fn parse_base_url(key: &str, raw: &str) -> StoreResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| StoreError::Config(format!("{}: {}", key, e)))?;

    if url.cannot_be_a_base() {
        return Err(StoreError::Config(format!(
            "{}: '{}' cannot be used as a base URL",
            key, raw
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = StoreConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_env_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("BREWCART_API_BASE_URL", "https://api.brew.example/v1"),
            ("BREWCART_MEDIA_BASE_URL", "https://cdn.brew.example/media"),
            ("BREWCART_CURRENCY_SYMBOL", "€"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url.as_str(), "https://api.brew.example/v1/");
        assert_eq!(
            config.media_base_url.as_str(),
            "https://cdn.brew.example/media/"
        );
        assert_eq!(config.currency_symbol, "€");
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = StoreConfig::from_lookup(lookup_from(&[("BREWCART_API_BASE_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));

        let err = StoreConfig::from_lookup(lookup_from(&[(
            "BREWCART_MEDIA_BASE_URL",
            "mailto:someone@example.com",
        )]))
        .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_format_currency_positive() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_without_decimals() {
        let config = StoreConfig {
            currency_symbol: "¥".to_string(),
            currency_decimals: 0,
            ..StoreConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_cents(450)), "¥5");
        assert_eq!(config.format_currency(Money::from_cents(449)), "¥4");
        assert_eq!(config.format_currency(Money::from_cents(45_000)), "¥450");
        assert_eq!(config.format_currency(Money::from_cents(-250)), "-¥3");
        assert_eq!(config.format_currency(Money::from_cents(-40)), "¥0");
    }

    #[test]
    fn test_format_currency_clamps_decimals() {
        let one = StoreConfig {
            currency_decimals: 1,
            ..StoreConfig::default()
        };
        assert_eq!(one.format_currency(Money::from_cents(1234)), "$12.3");
        assert_eq!(one.format_currency(Money::from_cents(1235)), "$12.4");

        let too_many = StoreConfig {
            currency_decimals: u8::MAX,
            ..StoreConfig::default()
        };
        assert_eq!(too_many.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(
            too_many.format_currency(Money::from_cents(i64::MIN)),
            "-$92233720368547758.08"
        );
    }
}
