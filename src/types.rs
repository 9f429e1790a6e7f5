use crate::{builder::ParsedRow, errors::WrappedError, parsers::prelude::*};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One category total for one reviewed year.
///
/// Expense categories are normally negative, income positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub category: String,
    pub total: Decimal,
}

impl ExpenseRow {
    pub fn new(category: impl Into<String>, total: Decimal) -> Self {
        Self {
            category: category.into(),
            total,
        }
    }
}

impl TryFrom<ParsedRow> for ExpenseRow {
    type Error = WrappedError;

    fn try_from(parsed: ParsedRow) -> Result<Self, Self::Error> {
        match parsed {
            ParsedRow::Csv(csv) => csv.try_into(),
        }
    }
}

impl TryFrom<CsvExpenseRow> for ExpenseRow {
    type Error = WrappedError;

    fn try_from(row: CsvExpenseRow) -> Result<Self, Self::Error> {
        Ok(ExpenseRow {
            category: row.category,
            total: row.total,
        })
    }
}

/// Categories the comparison report walks through, in report order.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Total Income",
    "Immediate Obligations",
    "True Expenses",
    "Groceries",
    "Medical",
    "Auto Maintenance",
    "Subscriptions",
    "Quality of Life Goals",
    "Vacation",
    "Gifts",
    "Just for Fun",
];

/// Fixed, ordered list of category names used verbatim as lookup keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.iter().copied())
    }
}

/// Outcome of comparing one category across the two years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub category: String,
    /// Absolute total for the initial year
    pub initial_total: Decimal,
    /// Absolute total for the compared year
    pub compared_total: Decimal,
    /// `compared_total - initial_total`; negative means less was spent
    pub difference: Decimal,
    pub percent_difference: Decimal,
}

impl ComparisonResult {
    /// Spending went down between the two years.
    pub fn improved(&self) -> bool {
        self.difference < Decimal::ZERO
    }
}
