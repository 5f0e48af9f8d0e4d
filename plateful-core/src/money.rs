//! Minor-unit money helpers centralizing the decimal wire conversion.
//!
//! Amounts inside the engine are `i64` minor units (cents) to avoid
//! floating-point drift. The backend exchanges decimals (`19.9`), so the
//! [`decimal`] serde adapter converts at the wire boundary.

use num_traits::cast::cast;
use thiserror::Error;

/// Minor units per major currency unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Errors raised when a decimal amount cannot be represented in minor units.
#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("amount {0} is not a finite number")]
    NonFinite(f64),
    #[error("amount {0} does not fit in minor units")]
    OutOfRange(f64),
}

/// Convert a decimal major-unit amount to minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns an error for NaN, infinities, and amounts outside the `i64` range.
pub fn decimal_to_minor(value: f64) -> Result<i64, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NonFinite(value));
    }
    let scale = cast::<i64, f64>(MINOR_PER_MAJOR).unwrap_or(100.0);
    let scaled = (value * scale).round();
    cast::<f64, i64>(scaled).ok_or(MoneyError::OutOfRange(value))
}

/// Convert minor units back to a decimal major-unit amount.
#[must_use]
pub fn minor_to_decimal(value: i64) -> f64 {
    let scale = cast::<i64, f64>(MINOR_PER_MAJOR).unwrap_or(100.0);
    cast::<i64, f64>(value).unwrap_or(0.0) / scale
}

/// Serde adapter storing minor units in memory and decimals on the wire.
pub mod decimal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize minor units as a decimal major-unit number.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(super::minor_to_decimal(*value))
    }

    /// Deserialize a decimal major-unit number into minor units.
    ///
    /// # Errors
    ///
    /// Fails when the input is not a number or cannot be represented.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        super::decimal_to_minor(raw).map_err(D::Error::custom)
    }
}
