use crate::errors::{WrappedError, WrappedResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An amount cell from an exported expense report.
///
/// Exports may format totals as plain decimals (`-1234.5`) or as currency
/// (`-$1,234.50`, `$-1,234.50`). Anything else is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvAmount(String);

impl CsvAmount {
    pub fn parse(&self) -> WrappedResult<Decimal> {
        let invalid = || WrappedError::CsvAmountInvalid(self.0.clone());

        let cleaned: String = self.0.trim().chars().filter(|c| *c != ',').collect();

        let (negative, body) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.as_str()),
        };
        let body = body.strip_prefix('$').unwrap_or(body);
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) if !negative => (true, rest),
            _ => (negative, body),
        };

        if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return Err(invalid());
        }

        let value = Decimal::from_str(body).map_err(|_| invalid())?;
        Ok(if negative { -value } else { value })
    }
}

impl From<String> for CsvAmount {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CsvAmount {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<CsvAmount> for Decimal {
    type Error = WrappedError;

    fn try_from(amount: CsvAmount) -> Result<Self, Self::Error> {
        amount.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5000", "5000")]
    #[case("-300.00", "-300.00")]
    #[case("  -42.5  ", "-42.5")]
    #[case("$1,234.56", "1234.56")]
    #[case("-$1,234.56", "-1234.56")]
    #[case("$-1,234.56", "-1234.56")]
    #[case(".75", "0.75")]
    fn test_csv_amount_valid_formats(#[case] input: &str, #[case] expected: &str) {
        let parsed: Decimal = CsvAmount::from(input).try_into().unwrap();
        assert_eq!(parsed, Decimal::from_str(expected).unwrap());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc")]
    #[case("--5")]
    #[case("$")]
    #[case("(1,234.50)")]
    #[case("12.3.4")]
    #[case("NaN")]
    fn test_csv_amount_invalid_formats(#[case] input: &str) {
        let result: Result<Decimal, _> = CsvAmount::from(input).try_into();
        assert!(matches!(
            result.unwrap_err(),
            WrappedError::CsvAmountInvalid(raw) if raw == input
        ));
    }

    #[test]
    fn test_csv_amount_from_string() {
        let amount = CsvAmount::from("-450".to_string());
        assert_eq!(amount.parse().unwrap(), Decimal::from(-450));
    }
}
