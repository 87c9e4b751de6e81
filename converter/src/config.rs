//! Conversion options.
//!
//! Defaults match the file names the lakes export has always used. The
//! environment (or a `.env` file loaded by the CLI) can override the paths.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::parser::DEFAULT_DELIMITER;

pub const DEFAULT_INPUT_PATH: &str = "pecheplaneau.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "lakes_for_mongodb.json";

/// Environment variable overriding the source CSV path.
pub const INPUT_ENV: &str = "LAKES_INPUT";
/// Environment variable overriding the destination JSON path.
pub const OUTPUT_ENV: &str = "LAKES_OUTPUT";

/// Options for a conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Source CSV
    pub input_path: PathBuf,

    /// Destination JSON, overwritten on each run
    pub output_path: PathBuf,

    /// Field delimiter of the source
    pub delimiter: char,

    /// Check produced records against the lake schema
    pub validate: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            delimiter: DEFAULT_DELIMITER,
            validate: true,
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with paths taken from [`INPUT_ENV`] / [`OUTPUT_ENV`] when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(input) = lookup(INPUT_ENV).filter(|v| !v.is_empty()) {
            options.input_path = PathBuf::from(input);
        }
        if let Some(output) = lookup(OUTPUT_ENV).filter(|v| !v.is_empty()) {
            options.output_path = PathBuf::from(output);
        }
        options
    }

    pub fn with_input(mut self, path: impl AsRef<Path>) -> Self {
        self.input_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_output(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}
