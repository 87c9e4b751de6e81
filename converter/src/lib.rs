//! # Lakes - fishing lakes CSV to MongoDB JSON
//!
//! Converts the semicolon-delimited export of Québec fishing lakes into a
//! JSON array of nested lake records ready to load into a document database.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│  Lake JSON  │
//! │  (UTF-8 ;)  │     │  (headers)  │     │ (area/motor)│     │  (2-space)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lakes::{run, ConvertOptions};
//!
//! let options = ConvertOptions::default()
//!     .with_input("pecheplaneau.csv")
//!     .with_output("lakes_for_mongodb.json");
//! let report = run(&options).unwrap();
//! println!("Converted {} lakes", report.lake_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`models`] - Lake record and catalog models
//! - [`parser`] - CSV reading with encoding fallback
//! - [`transform`] - Area/motor parsers, row assembly, catalog, pipeline
//! - [`validation`] - Lake JSON Schema validation
//! - [`config`] - Conversion options
//! - [`logs`] - Progress logging

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{AreaError, CsvError, PipelineError, TransformError, ValidationError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Acces, Camping, Catalog, Categorie, Coordonnees, Embarcation, Espece, Gas, Hebergement,
    Juridiction, Lake, Mesure, Motorisation, Organisme, Superficie, Unite,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::ConvertOptions;

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{decode_auto, read_bytes, read_file, read_table, Row, Table};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    build_catalog, build_lake, convert_bytes, convert_file, convert_str, convert_table,
    parse_area, parse_motorisation, run, to_json, write_lakes, ConversionReport, LakeRow,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid_lake, validate_lake, validate_lakes, ValidationReport};
