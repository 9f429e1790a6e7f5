//! Year-over-year category comparison and the text report built from it.

use std::fmt;

use crate::errors::{WrappedError, WrappedResult};
use crate::types::{CategorySet, ComparisonResult, ExpenseRow};
use log::debug;
use rust_decimal::Decimal;

const INDENT: &str = "        ";
const SUCCESS_MARKER: &str = "✔️";

/// Unsigned percentage change from `previous` to `current`.
///
/// Equal values yield `100`, and a zero `previous` yields `0` rather than an
/// error. The equality check runs first, so `(0, 0)` is `100`.
pub fn percent_difference(current: Decimal, previous: Decimal) -> Decimal {
    if current == previous {
        return Decimal::ONE_HUNDRED;
    }
    (current - previous)
        .abs()
        .checked_div(previous)
        .map(|ratio| ratio * Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

/// Formats an amount with two decimals and `,` thousands separators,
/// e.g. `-1,234.50`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    let fixed = format!("{:.2}", rounded);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

fn find_row<'a>(rows: &'a [ExpenseRow], category: &str, year: &str) -> WrappedResult<&'a ExpenseRow> {
    let mut matches = rows.iter().filter(|r| r.category == category);
    let first = matches.next().ok_or_else(|| WrappedError::CategoryNotFound {
        category: category.to_string(),
        year: year.to_string(),
    })?;

    let extra = matches.count();
    if extra > 0 {
        return Err(WrappedError::CategoryAmbiguous {
            category: category.to_string(),
            year: year.to_string(),
            matches: extra + 1,
        });
    }
    Ok(first)
}

/// Compares every category of `categories`, in order.
///
/// Fails on the first category that is missing or duplicated in either
/// year's rows.
pub fn compare(
    initial_rows: &[ExpenseRow],
    compared_rows: &[ExpenseRow],
    initial_year: &str,
    compared_year: &str,
    categories: &CategorySet,
) -> WrappedResult<Vec<ComparisonResult>> {
    categories
        .iter()
        .map(|category| -> WrappedResult<ComparisonResult> {
            let initial_total = find_row(initial_rows, category, initial_year)?.total.abs();
            let compared_total = find_row(compared_rows, category, compared_year)?.total.abs();
            let difference = compared_total - initial_total;
            debug!("{}: {} -> {} ({})", category, initial_total, compared_total, difference);

            Ok(ComparisonResult {
                category: category.to_string(),
                initial_total,
                compared_total,
                difference,
                percent_difference: percent_difference(compared_total, initial_total),
            })
        })
        .collect()
}

/// A finished comparison between two years. Rendered through `Display`.
#[derive(Debug, Clone)]
pub struct Report {
    initial_year: String,
    compared_year: String,
    results: Vec<ComparisonResult>,
}

impl Report {
    pub fn build(
        initial_rows: &[ExpenseRow],
        compared_rows: &[ExpenseRow],
        initial_year: &str,
        compared_year: &str,
        categories: &CategorySet,
    ) -> WrappedResult<Self> {
        let results = compare(initial_rows, compared_rows, initial_year, compared_year, categories)?;
        Ok(Self {
            initial_year: initial_year.to_string(),
            compared_year: compared_year.to_string(),
            results,
        })
    }

    pub fn results(&self) -> &[ComparisonResult] {
        &self.results
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Comparison of expenses for CY {} - {}",
            self.initial_year, self.compared_year
        )?;

        for result in &self.results {
            let marker = if result.improved() { SUCCESS_MARKER } else { "" };
            write!(f, "\n{INDENT}--- {} {} ---\n{INDENT}", result.category, marker)?;
            write!(
                f,
                "\n{INDENT}{} Expense:        ${}\n{INDENT}{} Expense:        ${}\n{INDENT}",
                self.initial_year,
                format_amount(result.initial_total),
                self.compared_year,
                format_amount(result.compared_total),
            )?;
            write!(
                f,
                "\n{INDENT}Difference:          ${}\n{INDENT}Percent Difference:  %{:.2}\n\n{INDENT}",
                format_amount(result.difference),
                result.percent_difference.round_dp(2),
            )?;
        }
        Ok(())
    }
}

/// Builds the comparison report text over the default category set.
pub fn gather_data(
    initial_rows: &[ExpenseRow],
    compared_rows: &[ExpenseRow],
    initial_year: &str,
    compared_year: &str,
) -> WrappedResult<String> {
    Report::build(
        initial_rows,
        compared_rows,
        initial_year,
        compared_year,
        &CategorySet::default(),
    )
    .map(|report| report.to_string())
}
