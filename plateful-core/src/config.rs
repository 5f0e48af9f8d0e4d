//! Engine configuration loaded from JSON.
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::favorite::FavoriteFailurePolicy;
use crate::format::CurrencyStyle;
use crate::quantity::QuantityRule;

/// Errors raised when configuration cannot be read or violates its invariants.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {floor} (got {value})")]
    CeilingBelowFloor {
        field: &'static str,
        floor: u32,
        value: u32,
    },
    #[error("request_timeout_ms must be greater than zero")]
    ZeroTimeout,
    #[error("currency separators must differ (both are {0:?})")]
    SeparatorClash(char),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Upper bound for the base item quantity; unbounded when absent.
    #[serde(default)]
    pub max_food_quantity: Option<u32>,
    /// Upper bound for each add-on quantity; unbounded when absent.
    #[serde(default)]
    pub max_extra_quantity: Option<u32>,
    #[serde(default)]
    pub favorite_failure: FavoriteFailurePolicy,
    /// Per-request timeout for remote calls; none when absent.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub currency: CurrencyStyle,
}

impl OrderConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or invalid values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, malformed or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Check invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(value) = self.max_food_quantity
            && value < QuantityRule::FOOD.floor
        {
            return Err(ConfigError::CeilingBelowFloor {
                field: "max_food_quantity",
                floor: QuantityRule::FOOD.floor,
                value,
            });
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.currency.decimal_separator == self.currency.thousands_separator {
            return Err(ConfigError::SeparatorClash(self.currency.decimal_separator));
        }
        Ok(())
    }

    #[must_use]
    pub const fn food_rule(&self) -> QuantityRule {
        QuantityRule::FOOD.with_ceiling(self.max_food_quantity)
    }

    #[must_use]
    pub const fn extra_rule(&self) -> QuantityRule {
        QuantityRule::EXTRA.with_ceiling(self.max_extra_quantity)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_unbounded_defaults() {
        let config = OrderConfig::from_json("{}").unwrap();
        assert_eq!(config, OrderConfig::default());
        assert_eq!(config.food_rule(), QuantityRule::FOOD);
        assert_eq!(config.extra_rule(), QuantityRule::EXTRA);
        assert!(config.request_timeout().is_none());
        assert_eq!(config.favorite_failure, FavoriteFailurePolicy::Keep);
    }

    #[test]
    fn parses_every_field() {
        let config = OrderConfig::from_json(
            r#"{
                "max_food_quantity": 10,
                "max_extra_quantity": 5,
                "favorite_failure": "revert",
                "request_timeout_ms": 2500,
                "currency": { "symbol": "US$", "decimal_separator": ".", "thousands_separator": "," }
            }"#,
        )
        .unwrap();
        assert_eq!(config.food_rule().ceiling, Some(10));
        assert_eq!(config.extra_rule().ceiling, Some(5));
        assert_eq!(config.favorite_failure, FavoriteFailurePolicy::Revert);
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.currency.symbol, "US$");
    }

    #[test]
    fn food_ceiling_below_one_is_rejected() {
        let err = OrderConfig::from_json(r#"{"max_food_quantity": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CeilingBelowFloor {
                field: "max_food_quantity",
                ..
            }
        ));
    }

    #[test]
    fn zero_extra_ceiling_is_allowed() {
        let config = OrderConfig::from_json(r#"{"max_extra_quantity": 0}"#).unwrap();
        assert_eq!(config.extra_rule().increment(0), 0);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = OrderConfig::from_json(r#"{"request_timeout_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));
    }

    #[test]
    fn clashing_separators_are_rejected() {
        let err = OrderConfig::from_json(
            r#"{"currency": {"decimal_separator": ".", "thousands_separator": "."}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::SeparatorClash('.')));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let err = OrderConfig::from_json(r#"{"favorite_failure": "retry"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reports_missing_files() {
        let path = std::env::temp_dir().join("plateful-config-does-not-exist.json");
        let err = OrderConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
