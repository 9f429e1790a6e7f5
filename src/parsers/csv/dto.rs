use super::types::CsvAmount;
use crate::errors::WrappedError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row as exported by the budgeting service's income/expense report.
/// Monthly columns and averages are ignored.
#[derive(Debug, Deserialize)]
pub struct CsvExpenseRowRaw {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Total")]
    pub total: Option<String>,
}

impl CsvExpenseRowRaw {
    /// Group headers and spacer rows carry no total.
    pub fn has_total(&self) -> bool {
        self.total.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvExpenseRow {
    pub category: String,
    pub total: Decimal,
}

impl TryFrom<CsvExpenseRowRaw> for CsvExpenseRow {
    type Error = WrappedError;

    fn try_from(raw: CsvExpenseRowRaw) -> Result<Self, Self::Error> {
        let total = CsvAmount::from(raw.total.unwrap_or_default()).parse()?;

        Ok(CsvExpenseRow {
            category: raw.category,
            total,
        })
    }
}
