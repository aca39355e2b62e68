//! Payment amounts.
//!
//! GB Prime Pay expects every amount as a fixed-point string with exactly two
//! fractional digits (`"10.00"`). [`Amount`] performs that normalisation once,
//! at construction, so the value that is signed is always the value that is
//! sent.
//!
//! Rounding is applied to the decimal value, half away from zero:
//! `10.999` becomes `11.00` and `10.005` becomes `10.01`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Number of fractional digits the provider expects.
pub const AMOUNT_SCALE: u32 = 2;

/// A payment amount normalised to two decimal places.
///
/// # Example
///
/// ```rust
/// use gbprimepay::Amount;
///
/// assert_eq!(Amount::from(10u32).to_string(), "10.00");
/// assert_eq!("10.5".parse::<Amount>().unwrap().to_string(), "10.50");
/// assert_eq!(Amount::try_from(10.999).unwrap().to_string(), "11.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Creates an amount from a decimal, rounding it to two places.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::OutOfRange`] if the value is too large to carry
    /// two fractional digits.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        let mut rounded =
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(AMOUNT_SCALE);
        if rounded.scale() != AMOUNT_SCALE {
            return Err(AmountError::OutOfRange(value.to_string()));
        }
        Ok(Self(rounded))
    }

    /// Integers up to `u64::MAX` always fit with two fractional digits.
    fn from_integer(value: Decimal) -> Self {
        let mut scaled = value;
        scaled.rescale(AMOUNT_SCALE);
        Self(scaled)
    }

    /// Returns the normalised decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

/// Error returned when a value cannot be turned into an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The input string is not a decimal number.
    #[error("Invalid amount {0:?}")]
    Invalid(String),
    /// The input float is NaN or infinite, or too large for a decimal.
    #[error("Amount is not a finite decimal: {0}")]
    NonFinite(String),
    /// The value is too large to be expressed with two fractional digits.
    #[error("Amount out of range: {0}")]
    OutOfRange(String),
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| AmountError::Invalid(s.to_owned()))?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self::from_integer(Decimal::from(value))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self::from_integer(Decimal::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::from_integer(Decimal::from(value))
    }
}

impl TryFrom<f64> for Amount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(AmountError::NonFinite(value.to_string()));
        }
        let decimal =
            Decimal::try_from(value).map_err(|_| AmountError::NonFinite(value.to_string()))?;
        Self::new(decimal)
    }
}

impl TryFrom<&str> for Amount {
    type Error = AmountError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.to_string()
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self::from_str(&s).map_err(de::Error::custom),
            Raw::Integer(n) => Ok(Self::from(n)),
            Raw::Float(f) => Self::try_from(f).map_err(de::Error::custom),
        }
    }
}
