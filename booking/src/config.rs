//! Configuration management for the booking service.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::catalog::RoomRatePolicy;
use crate::selection::StaleSelectionPolicy;
use crate::types::Money;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Booking configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Pricing configuration
    pub pricing: PricingConfig,
    /// Catalog service configuration
    pub catalog: CatalogServiceConfig,
    /// Payment configuration
    pub payment: PaymentConfig,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Pricing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Nightly room rates and per-class bound
    pub room_rates: RoomRatePolicy,
    /// Handling of categories and plans that do not resolve
    pub stale_selection_policy: StaleSelectionPolicy,
}

/// Catalog service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogServiceConfig {
    /// REST base URL; the in-memory sample catalog is used when unset
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CatalogServiceConfig {
    /// Request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Payment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Page the user is redirected to for payment setup
    pub setup_url: String,
}

impl BookingConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let default_rates = defaults.pricing.room_rates;

        Self {
            pricing: PricingConfig {
                room_rates: RoomRatePolicy {
                    ac_rate: lookup("ROOM_RATE_AC")
                        .and_then(|s| s.parse().ok())
                        .map_or(default_rates.ac_rate, Money::from_rupees),
                    non_ac_rate: lookup("ROOM_RATE_NON_AC")
                        .and_then(|s| s.parse().ok())
                        .map_or(default_rates.non_ac_rate, Money::from_rupees),
                    max_per_class: lookup("MAX_ROOMS_PER_CLASS")
                        .and_then(|s| s.parse().ok())
                        .unwrap_or(default_rates.max_per_class),
                },
                stale_selection_policy: lookup("STALE_SELECTION_POLICY")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            catalog: CatalogServiceConfig {
                base_url: lookup("CATALOG_BASE_URL").filter(|url| !url.trim().is_empty()),
                timeout_secs: lookup("CATALOG_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.catalog.timeout_secs),
            },
            payment: PaymentConfig {
                setup_url: lookup("PAYMENT_SETUP_URL").unwrap_or(defaults.payment.setup_url),
            },
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig {
                room_rates: RoomRatePolicy::default(),
                stale_selection_policy: StaleSelectionPolicy::Degrade,
            },
            catalog: CatalogServiceConfig {
                base_url: None,
                timeout_secs: 10,
            },
            payment: PaymentConfig {
                setup_url: "https://payments.example.com/setup".to_string(),
            },
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = BookingConfig::from_lookup(lookup(&[]));

        assert_eq!(config.pricing.room_rates, RoomRatePolicy::default());
        assert_eq!(
            config.pricing.stale_selection_policy,
            StaleSelectionPolicy::Degrade
        );
        assert_eq!(config.catalog.base_url, None);
        assert_eq!(config.catalog.timeout(), Duration::from_secs(10));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = BookingConfig::from_lookup(lookup(&[
            ("ROOM_RATE_AC", "6500"),
            ("ROOM_RATE_NON_AC", "3500"),
            ("MAX_ROOMS_PER_CLASS", "4"),
            ("STALE_SELECTION_POLICY", "reject"),
            ("CATALOG_BASE_URL", "https://catalog.local/api"),
            ("CATALOG_TIMEOUT_SECS", "3"),
            ("PAYMENT_SETUP_URL", "https://pay.local/setup"),
        ]));

        assert_eq!(config.pricing.room_rates.ac_rate, Money::from_rupees(6_500));
        assert_eq!(config.pricing.room_rates.non_ac_rate, Money::from_rupees(3_500));
        assert_eq!(config.pricing.room_rates.max_per_class, 4);
        assert_eq!(
            config.pricing.stale_selection_policy,
            StaleSelectionPolicy::Reject
        );
        assert_eq!(
            config.catalog.base_url.as_deref(),
            Some("https://catalog.local/api")
        );
        assert_eq!(config.catalog.timeout_secs, 3);
        assert_eq!(config.payment.setup_url, "https://pay.local/setup");
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = BookingConfig::from_lookup(lookup(&[
            ("ROOM_RATE_AC", "five thousand"),
            ("MAX_ROOMS_PER_CLASS", "-2"),
            ("STALE_SELECTION_POLICY", "lenient"),
            ("CATALOG_BASE_URL", "  "),
        ]));

        assert_eq!(config.pricing.room_rates, RoomRatePolicy::default());
        assert_eq!(
            config.pricing.stale_selection_policy,
            StaleSelectionPolicy::Degrade
        );
        assert_eq!(config.catalog.base_url, None);
    }
}
