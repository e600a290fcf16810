//! Error types for bakeweb-core
//!
//! Sort failures carry an error code, a severity and a detail record with
//! suggestions, so the binary can print something actionable.

use bakeweb_dom::{DomError, NodeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Table has no body section
    MalformedTable,
    /// Node is not a table element
    NotATable,
    /// Column identifier is not a positive integer
    InvalidColumn,
    /// Locale could not be used for collation
    CollationError,
    /// Document operation failed
    DomError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::MalformedTable => write!(f, "MALFORMED_TABLE"),
            ErrorCode::NotATable => write!(f, "NOT_A_TABLE"),
            ErrorCode::InvalidColumn => write!(f, "INVALID_COLUMN"),
            ErrorCode::CollationError => write!(f, "COLLATION_ERROR"),
            ErrorCode::DomError => write!(f, "DOM_ERROR"),
        }
    }
}

/// Detailed error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Operation skipped, rest of the page unaffected
    Warning,
    /// Operation failed
    Error,
    /// Controller cannot be set up
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for bakeweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed table {table}: no tbody section")]
    MalformedTable { table: NodeId },

    #[error("Node {node} is not a table")]
    NotATable { node: NodeId },

    #[error("Invalid column identifier: {value:?}")]
    InvalidColumn { value: String },

    #[error("Collation unavailable for locale {locale:?}: {message}")]
    Collation { locale: String, message: String },

    #[error("Document error: {0}")]
    Dom(#[from] DomError),
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::MalformedTable { .. } => ErrorCode::MalformedTable,
            CoreError::NotATable { .. } => ErrorCode::NotATable,
            CoreError::InvalidColumn { .. } => ErrorCode::InvalidColumn,
            CoreError::Collation { .. } => ErrorCode::CollationError,
            CoreError::Dom(_) => ErrorCode::DomError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::MalformedTable { .. } => ErrorSeverity::Error,
            CoreError::NotATable { .. } => ErrorSeverity::Error,
            CoreError::InvalidColumn { .. } => ErrorSeverity::Warning,
            CoreError::Collation { .. } => ErrorSeverity::Critical,
            CoreError::Dom(_) => ErrorSeverity::Error,
        }
    }

    /// Log level for this error's severity
    pub fn log_level(&self) -> log::Level {
        match self.severity() {
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }

    /// Log the error at the level its severity calls for
    pub fn report(&self, operation: &str) {
        log::log!(
            target: "bakeweb::error",
            self.log_level(),
            "{} [{}] {} - Operation: {}",
            self.severity().to_string().to_uppercase(),
            self.code(),
            self,
            operation
        );
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::MalformedTable { table } => {
                details = details.with_detail(serde_json::json!({ "table": table.index() }));
                details = details.with_suggestion(
                    "Wrap the data rows of the sortable table in a <tbody> element.".to_string()
                );
            }
            CoreError::InvalidColumn { value } => {
                details = details.with_detail(serde_json::json!({ "value": value }));
                details = details.with_suggestion(
                    "Column identifiers are 1-based integers, e.g. data-sort=\"2\".".to_string()
                );
            }
            CoreError::Collation { locale, .. } => {
                details = details.with_suggestion(format!(
                    "Check collation.locale in the config file (currently {:?}).", locale
                ));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================
