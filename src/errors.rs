use thiserror::Error;

/// Errors raised while loading expense reports, comparing them, or talking to
/// the budgeting service.
#[derive(Error, Debug)]
pub enum WrappedError {
    /// Generic parse failure (detail in the message)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// The builder was asked to parse without content, a path, or a year
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    // ── Expense report errors ───────────────────────────────────────────────

    #[error("Invalid amount in CSV: {0:?}")]
    CsvAmountInvalid(String),

    #[error("Missing required column in CSV: {0}")]
    CsvMissingColumn(String),

    /// A compared category has no row in one of the year's reports
    #[error("Category {category:?} not found in the {year} report")]
    CategoryNotFound { category: String, year: String },

    /// A compared category has more than one row in one of the year's reports
    #[error("Category {category:?} appears {matches} times in the {year} report")]
    CategoryAmbiguous {
        category: String,
        year: String,
        matches: usize,
    },

    // ── Configuration and budgeting service ─────────────────────────────────

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(#[from] serde_json::Error),

    #[error("No API token configured (set `token` in the config file or WRAPPED_TOKEN)")]
    MissingToken,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Budgeting service returned {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Prompt failed: {0}")]
    PromptFailed(String),
}

pub type WrappedResult<T> = Result<T, WrappedError>;
