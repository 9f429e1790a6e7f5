use std::fs;
use std::path::{Path, PathBuf};

use crate::{errors::WrappedError, parsers::prelude::*, types::ExpenseRow};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParsedRow {
    Csv(CsvExpenseRow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "csv")]
    Csv,
}

impl FileFormat {
    fn parse_raw(&self, content: &str) -> Result<Vec<ParsedRow>, WrappedError> {
        match self {
            FileFormat::Csv => {
                let rows = CsvParser::parse(content)?;
                Ok(rows.into_iter().map(ParsedRow::Csv).collect())
            }
        }
    }

    fn parse<T>(&self, content: &str) -> Result<Vec<T>, WrappedError>
    where
        T: TryFrom<ParsedRow, Error = WrappedError>,
    {
        self.parse_raw(content)?
            .into_iter()
            .map(T::try_from)
            .collect()
    }

    fn detect(filename: Option<&str>, content: Option<&str>) -> Result<Self, WrappedError> {
        if let Some(content) = content {
            if CsvParser::is_supported(filename, content) {
                return Ok(FileFormat::Csv);
            }
        }

        if let (Some(filename), None) = (filename, content) {
            if filename.to_lowercase().ends_with(".csv") {
                return Ok(FileFormat::Csv);
            }
        }

        Err(WrappedError::UnsupportedFormat)
    }
}

/// Where the expense report for `year` lives inside `directory`.
pub fn report_path(directory: impl AsRef<Path>, year: &str) -> PathBuf {
    directory.as_ref().join(format!("{}-expense-report.csv", year))
}

/// Loads one year's expense report into [`ExpenseRow`]s.
///
/// The source is, in order of preference: explicit content, an explicit
/// file path, or the report file for `year` inside `directory`.
#[derive(Default)]
pub struct ExpenseReportBuilder {
    content: Option<String>,
    filepath: Option<PathBuf>,
    directory: Option<PathBuf>,
    year: Option<String>,
    format: Option<FileFormat>,
}

impl ExpenseReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.filepath = Some(filename.as_ref().to_path_buf());
        self
    }

    pub fn directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.directory = Some(directory.as_ref().to_path_buf());
        self
    }

    pub fn year(mut self, year: &str) -> Self {
        self.year = Some(year.to_string());
        self
    }

    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    fn resolved_path(&self) -> Option<PathBuf> {
        self.filepath.clone().or_else(|| {
            self.year.as_deref().map(|year| {
                report_path(self.directory.as_deref().unwrap_or(Path::new(".")), year)
            })
        })
    }

    pub fn parse(self) -> Result<Vec<ExpenseRow>, WrappedError> {
        self.parse_into::<ExpenseRow>()
    }

    pub fn parse_into<T>(self) -> Result<Vec<T>, WrappedError>
    where
        T: TryFrom<ParsedRow, Error = WrappedError>,
    {
        let path = self.resolved_path();

        let format = self
            .format
            .map(Ok)
            .unwrap_or_else(|| {
                FileFormat::detect(
                    path.as_deref().and_then(Path::to_str),
                    self.content.as_deref(),
                )
            })?;

        let content = match self.content {
            Some(content) => content,
            None => {
                let path = path.as_ref().ok_or(WrappedError::MissingContentAndFilepath)?;
                fs::read_to_string(path)?
            }
        };

        let rows = format.parse(&content)?;
        match &path {
            Some(path) => info!("loaded {} rows from {}", rows.len(), path.display()),
            None => info!("loaded {} rows", rows.len()),
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_CSV: &str = "Category,Total\nTotal Income,5000.00\nGroceries,-300.00\n";

    #[test]
    fn test_builder_missing_content() {
        let result: Result<Vec<ExpenseRow>, _> = ExpenseReportBuilder::new().parse();
        assert!(matches!(result, Err(WrappedError::UnsupportedFormat)));
    }

    #[test]
    fn test_builder_new() {
        let builder = ExpenseReportBuilder::new();
        assert!(builder.content.is_none());
        assert!(builder.filepath.is_none());
        assert!(builder.directory.is_none());
        assert!(builder.year.is_none());
        assert!(builder.format.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = ExpenseReportBuilder::new()
            .content("content")
            .directory("reports")
            .year("2023")
            .format(FileFormat::Csv);

        assert!(builder.content.is_some());
        assert_eq!(builder.year.as_deref(), Some("2023"));
        assert_eq!(builder.format, Some(FileFormat::Csv));
    }

    #[rstest]
    #[case(None, None, None, None)]
    #[case(Some("a.csv"), None, None, Some("a.csv"))]
    #[case(Some("a.csv"), Some("reports"), Some("2023"), Some("a.csv"))]
    #[case(None, Some("reports"), Some("2023"), Some("reports/2023-expense-report.csv"))]
    #[case(None, None, Some("2022"), Some("./2022-expense-report.csv"))]
    #[case(None, Some("reports"), None, None)]
    fn test_resolved_path(
        #[case] filename: Option<&str>,
        #[case] directory: Option<&str>,
        #[case] year: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let mut builder = ExpenseReportBuilder::new();
        if let Some(f) = filename {
            builder = builder.filename(f);
        }
        if let Some(d) = directory {
            builder = builder.directory(d);
        }
        if let Some(y) = year {
            builder = builder.year(y);
        }
        assert_eq!(builder.resolved_path(), expected.map(PathBuf::from));
    }

    #[rstest]
    #[case(Some(FileFormat::Csv), None)]
    #[case(None, None)]
    #[case(None, Some("2023-expense-report.csv"))]
    fn test_parse_with_different_detection_methods(
        #[case] format: Option<FileFormat>,
        #[case] filename: Option<&str>,
    ) {
        let mut builder = ExpenseReportBuilder::new().content(SAMPLE_CSV);
        if let Some(fmt) = format {
            builder = builder.format(fmt);
        }
        if let Some(fname) = filename {
            builder = builder.filename(fname);
        }

        let rows = builder.parse().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].category, "Groceries");
        assert_eq!(rows[1].total, Decimal::from_str("-300").unwrap());
    }

    #[rstest]
    #[case(None, Some(SAMPLE_CSV), true)]
    #[case(Some("2023-expense-report.csv"), None, true)]
    #[case(Some("2023-expense-report.CSV"), Some(SAMPLE_CSV), true)]
    #[case(Some("statement.qfx"), Some(SAMPLE_CSV), false)]
    #[case(Some("report.csv"), Some("random content"), false)]
    #[case(None, None, false)]
    fn test_file_format_detect(
        #[case] filename: Option<&str>,
        #[case] content: Option<&str>,
        #[case] should_succeed: bool,
    ) {
        let result = FileFormat::detect(filename, content);
        if should_succeed {
            assert_eq!(result.unwrap(), FileFormat::Csv);
        } else {
            assert!(matches!(result.unwrap_err(), WrappedError::UnsupportedFormat));
        }
    }

    #[test]
    fn test_parse_from_year_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(report_path(dir.path(), "2023"), SAMPLE_CSV).unwrap();

        let rows = ExpenseReportBuilder::new()
            .directory(dir.path())
            .year("2023")
            .parse()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Total Income");
    }

    #[test]
    fn test_parse_missing_year_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = ExpenseReportBuilder::new()
            .directory(dir.path())
            .year("1999")
            .parse();

        assert!(matches!(result.unwrap_err(), WrappedError::ReadContentFailed(_)));
    }

    #[test]
    fn test_parse_no_content_no_filepath() {
        let result = ExpenseReportBuilder::new().format(FileFormat::Csv).parse();
        assert!(matches!(result.unwrap_err(), WrappedError::MissingContentAndFilepath));
    }

    #[test]
    fn test_file_format_serialization() {
        let json = serde_json::to_string(&FileFormat::Csv).unwrap();
        assert_eq!(json, "\"csv\"");

        let deserialized: FileFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, FileFormat::Csv);
    }
}
