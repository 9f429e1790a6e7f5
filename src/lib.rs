//! Compare categorized budget expenses between two calendar years.
//!
//! ```rust,ignore
//! use budget_wrapped::{ExpenseReportBuilder, gather_data};
//!
//! let initial = ExpenseReportBuilder::new().directory("reports").year("2022").parse()?;
//! let compared = ExpenseReportBuilder::new().directory("reports").year("2023").parse()?;
//! println!("{}", gather_data(&initial, &compared, "2022", "2023")?);
//! ```

mod builder;
mod types;

pub mod config;
pub mod errors;
pub mod message;
pub mod parsers;
pub mod report;
pub mod ynab;

pub use builder::{ExpenseReportBuilder, FileFormat, ParsedRow, report_path};
pub use config::Config;
pub use parsers::prelude::*;
pub use report::{Report, compare, format_amount, gather_data, percent_difference};
pub use types::{CategorySet, ComparisonResult, DEFAULT_CATEGORIES, ExpenseRow};
