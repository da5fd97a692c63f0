use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Exact-decimal transfer amount.
///
/// The wire form is always the exact decimal string (`100` → `"100"`,
/// `10.50` → `"10.50"`), never a binary float. Scale is preserved as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

impl Amount {
    /// Validate a decimal as a transfer amount. Must be strictly positive.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount {
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = input
            .trim()
            .parse::<Decimal>()
            .map_err(|_| ValidationError::MalformedAmount {
                value: input.to_owned(),
            })?;
        Self::new(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Amount {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Amount {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self {
        value.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_amount_keeps_exact_string_form() {
        let amount = Amount::parse("100").expect("amount should parse");
        assert_eq!(amount.to_string(), "100");
    }

    #[test]
    fn fractional_amount_keeps_scale() {
        let amount = Amount::parse("10.50").expect("amount should parse");
        assert_eq!(amount.to_string(), "10.50");
    }

    #[test]
    fn rejects_zero() {
        let err = Amount::parse("0").expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositiveAmount { .. }));
    }

    #[test]
    fn rejects_negative() {
        let err = Amount::new(Decimal::new(-5, 0)).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositiveAmount { .. }));
    }

    #[test]
    fn rejects_garbage() {
        let err = Amount::parse("ten").expect_err("must fail");
        assert!(matches!(err, ValidationError::MalformedAmount { .. }));
    }
}
