//! Error types for the lakes conversion pipeline.
//!
//! One enum per layer:
//!
//! - [`CsvError`] - reading and decoding the source table
//! - [`AreaError`] - malformed combined surface-area text
//! - [`TransformError`] - row to lake record construction
//! - [`ValidationError`] - JSON Schema checks on produced records
//! - [`PipelineError`] - top-level orchestration
//!
//! Conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading the source CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be decoded to text.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Malformed CSV content.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file (no header row).
    #[error("CSV file is empty")]
    EmptyFile,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => CsvError::Io(io),
            csv::ErrorKind::Utf8 { err, .. } => CsvError::Encoding(err.to_string()),
            other => CsvError::Parse {
                line,
                message: format!("{:?}", other),
            },
        }
    }
}

// =============================================================================
// Area Errors
// =============================================================================

/// Combined "ha (km2)" surface text that does not follow the expected layout.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AreaError {
    /// The hectare part is not a number.
    #[error("invalid hectare value '{0}'")]
    InvalidHectares(String),

    /// No opening parenthesis before the km2 part.
    #[error("missing '(' before the km2 value")]
    MissingParenthesis,

    /// The square kilometer part is not a number.
    #[error("invalid km2 value '{0}'")]
    InvalidSquareKilometers(String),
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while turning a row into a lake record.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A required field is absent from a row.
    #[error("Line {line}: missing field '{column}'")]
    MissingField { column: String, line: u64 },

    /// A field does not parse as the expected number or sub-format.
    #[error("Line {line}, column '{column}' (value '{value}'): {message}")]
    Format {
        column: String,
        line: u64,
        value: String,
        message: String,
    },
}

impl TransformError {
    /// Build a format error with context.
    pub fn format(
        column: impl Into<String>,
        line: u64,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Format {
            column: column.into(),
            line,
            value: value.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors during lake schema validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Some records do not match the schema.
    #[error("{count} record(s) failed validation, first: {first}")]
    SchemaError { count: usize, first: String },

    /// The embedded schema itself is broken.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Row transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Output could not be written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        let transform_err = TransformError::MissingField {
            column: "Secteur".into(),
            line: 3,
        };
        let pipeline_err: PipelineError = transform_err.into();
        assert!(pipeline_err.to_string().contains("Secteur"));
    }

    #[test]
    fn test_format_error_message() {
        let err = TransformError::format("latitude", 5, "abc", "not a number");
        let msg = err.to_string();
        assert!(msg.contains("Line 5"));
        assert!(msg.contains("column 'latitude'"));
        assert!(msg.contains("value 'abc'"));
    }

    #[test]
    fn test_area_error_message() {
        let err = AreaError::InvalidHectares("beaucoup".into());
        assert!(err.to_string().contains("beaucoup"));
    }
}
