//! JSON Schema validation for lake records.
//!
//! The schema (`schemas/lake.json`, Draft 7) is embedded at compile time. It
//! is stricter than the converter in a few places (non-empty lake name,
//! coordinate ranges), so validation reports problems in the source data
//! without ever changing what gets written.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use lakes::validation::validate_lake;
//!
//! let lake = json!({ "nomDuLac": "Lac Vert" });
//! assert!(validate_lake(&lake).is_err());
//! ```

use serde_json::Value;

use crate::error::ValidationError;

const LAKE_SCHEMA: &str = include_str!("../../schemas/lake.json");

/// Validate a JSON value against a JSON Schema.
///
/// # Returns
/// * `Ok(())` when valid
/// * `Err(Vec<String>)` with every error otherwise
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The embedded lake schema.
pub fn lake_schema() -> Result<Value, ValidationError> {
    serde_json::from_str(LAKE_SCHEMA).map_err(|e| ValidationError::InvalidSchema(e.to_string()))
}

/// Validate one lake record.
pub fn validate_lake(data: &Value) -> Result<(), Vec<String>> {
    let schema = lake_schema().map_err(|e| vec![e.to_string()])?;
    validate(&schema, data)
}

/// Quick check against the lake schema.
pub fn is_valid_lake(data: &Value) -> bool {
    validate_lake(data).is_ok()
}

/// Outcome of validating a batch of records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub valid_count: usize,
    pub invalid_count: usize,
    /// (record index, errors), first records only
    pub errors: Vec<(usize, Vec<String>)>,
}

impl ValidationReport {
    /// Maximum number of invalid records whose errors are kept.
    pub const MAX_REPORTED: usize = 10;

    pub fn is_valid(&self) -> bool {
        self.invalid_count == 0
    }

    /// Collapse into an error when anything failed.
    pub fn into_result(self) -> Result<Self, ValidationError> {
        match self.errors.first() {
            Some((index, errs)) => Err(ValidationError::SchemaError {
                count: self.invalid_count,
                first: format!("record {}: {}", index, errs.join(", ")),
            }),
            None => Ok(self),
        }
    }
}

/// Validate every record, compiling the schema once.
pub fn validate_lakes(records: &[Value]) -> Result<ValidationReport, ValidationError> {
    let schema = lake_schema()?;
    let validator = jsonschema::draft7::new(&schema)
        .map_err(|e| ValidationError::InvalidSchema(e.to_string()))?;

    let mut report = ValidationReport::default();
    for (i, record) in records.iter().enumerate() {
        let errors: Vec<String> = validator
            .iter_errors(record)
            .map(|e| e.to_string())
            .collect();

        if errors.is_empty() {
            report.valid_count += 1;
        } else {
            report.invalid_count += 1;
            if report.errors.len() < ValidationReport::MAX_REPORTED {
                report.errors.push((i, errors));
            }
        }
    }

    Ok(report)
}
