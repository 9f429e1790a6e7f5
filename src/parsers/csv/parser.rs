use super::dto::{CsvExpenseRow, CsvExpenseRowRaw};
use crate::errors::{WrappedError, WrappedResult};
use crate::parsers::traits::Parser;
use csv::{ReaderBuilder, Trim};
use log::debug;

pub const CATEGORY_COLUMN: &str = "Category";
pub const TOTAL_COLUMN: &str = "Total";

pub struct CsvParser;

impl Parser for CsvParser {
    type Output = CsvExpenseRow;

    fn is_supported(filename: Option<&str>, content: &str) -> bool {
        let has_csv_extension = filename
            .map(|name| name.to_lowercase().ends_with(".csv"))
            .unwrap_or(false);

        let first_line = content.lines().next().unwrap_or("");
        let looks_like_report =
            first_line.contains(CATEGORY_COLUMN) && first_line.contains(TOTAL_COLUMN);

        match filename {
            Some(_) => has_csv_extension && looks_like_report,
            None => looks_like_report,
        }
    }

    fn parse(content: &str) -> WrappedResult<Vec<Self::Output>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content.trim_start_matches('\u{feff}').as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| WrappedError::ParseFailed(format!("CSV header error: {}", e)))?;
        for column in [CATEGORY_COLUMN, TOTAL_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(WrappedError::CsvMissingColumn(column.to_string()));
            }
        }

        let mut rows = Vec::new();

        for result in reader.deserialize::<CsvExpenseRowRaw>() {
            let raw =
                result.map_err(|e| WrappedError::ParseFailed(format!("CSV deserialize error: {}", e)))?;
            if !raw.has_total() {
                debug!("skipping row without total: {:?}", raw.category);
                continue;
            }
            rows.push(raw.try_into()?);
        }

        Ok(rows)
    }
}
