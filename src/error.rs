//! Defines the custom error types for the email-finder application.

use thiserror::Error;
use url::ParseError as UrlParseError;

/// The primary error type for everything around pattern generation.
///
/// Pattern generation itself never fails; these errors come from admitting
/// input, rendering output and serving requests. Configuration and file
/// loading report through `anyhow` with context instead.
#[derive(Error, Debug)]
pub(crate) enum AppError {
    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing rendered text.
    #[error("Render Error: {0}")]
    Render(#[from] std::fmt::Error),

    /// Error parsing a domain typed as a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Indicates insufficient input data to proceed (e.g., missing name/domain).
    #[error("Insufficient Input Data: {0}")]
    InsufficientInput(String),

    /// The domain does not look like a DNS-style domain name.
    #[error("Invalid Domain: {0}")]
    InvalidDomain(String),

    /// Failed to extract a domain from the provided input.
    #[error("Failed to extract domain from input: {0}")]
    DomainExtraction(String),

    /// Quick search input is not of the form "names @ domain".
    #[error("Invalid Quick Search Format: {0}")]
    QuickSearchFormat(String),

    /// No person with this id in the store.
    #[error("Person Not Found: {0}")]
    PersonNotFound(u64),
}

impl AppError {
    /// Locale key of the message to show the user, if this error is user-facing.
    pub(crate) fn message_key(&self) -> Option<&'static str> {
        match self {
            AppError::InsufficientInput(_) => Some("fillAllFields"),
            AppError::InvalidDomain(_)
            | AppError::DomainExtraction(_)
            | AppError::UrlParse(_) => Some("invalidDomain"),
            AppError::QuickSearchFormat(_) => Some("invalidFormat"),
            AppError::PersonNotFound(_) => Some("personNotFound"),
            _ => None,
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, AppError>;
