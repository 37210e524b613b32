//! Error handling for table reconstruction
//!
//! This module provides a unified error type and result type for all
//! reconstruction operations, plus the non-fatal warning type collected
//! into every `TableModel`.

use std::fmt;

/// Reconstruction error type
///
/// Errors are reserved for inputs that violate the basic contract; all
/// structural anomalies inside a well-formed input are reported as
/// [`Warning`]s instead.
#[derive(Debug, Clone)]
pub enum TableError {
    /// Invalid input - the table violates the input contract
    InvalidInput {
        message: String,
        row: Option<usize>,
        column: Option<usize>,
    },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidInput {
                message,
                row,
                column,
            } => {
                if let (Some(r), Some(c)) = (row, column) {
                    write!(f, "Invalid input at row {}, column {}: {}", r, c, message)
                } else if let Some(r) = row {
                    write!(f, "Invalid input at row {}: {}", r, message)
                } else {
                    write!(f, "Invalid input: {}", message)
                }
            }
            TableError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Result type for reconstruction operations
pub type TableResult<T> = Result<T, TableError>;

// Convenience constructors for errors
impl TableError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TableError::InvalidInput {
            message: message.into(),
            row: None,
            column: None,
        }
    }

    pub fn invalid_at(message: impl Into<String>, row: usize, column: usize) -> Self {
        TableError::InvalidInput {
            message: message.into(),
            row: Some(row),
            column: Some(column),
        }
    }

    pub fn invalid_at_row(message: impl Into<String>, row: usize) -> Self {
        TableError::InvalidInput {
            message: message.into(),
            row: Some(row),
            column: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        TableError::InternalError {
            message: message.into(),
        }
    }
}

/// A recoverable structural anomaly (non-fatal)
///
/// Warnings are returned as data inside the table model rather than logged
/// to a shared sink, so the engine stays composable under concurrent use.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    /// Grid row index (0-based)
    pub row: Option<usize>,
    /// Grid column index (0-based)
    pub column: Option<usize>,
}

impl Warning {
    /// Create a new warning without a locus
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            row: None,
            column: None,
        }
    }

    /// Attach a row locus
    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Attach a column locus
    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        match (self.row, self.column) {
            (Some(r), Some(c)) => write!(f, " (row {}, column {})", r, c),
            (Some(r), None) => write!(f, " (row {})", r),
            (None, Some(c)) => write!(f, " (column {})", c),
            (None, None) => Ok(()),
        }
    }
}
