//! High-level pipeline API for CSV to lake JSON conversion.
//!
//! The run is all-or-nothing: the whole table is read and converted before
//! the destination is touched, and the first bad row aborts everything.
//!
//! # Example
//!
//! ```rust,ignore
//! use lakes::{run, ConvertOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run(&ConvertOptions::default())?;
//!     println!("Converted {} lakes", report.lake_count);
//!     Ok(())
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConvertOptions;
use crate::error::{PipelineResult, TransformResult};
use crate::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::models::{Lake, Superficie};
use crate::parser::{read_bytes, read_file, read_table, Table};
use crate::validation::{validate_lakes, ValidationReport};

use super::lake::{build_lake, ColumnMap, LakeRow};

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub encoding: String,
    pub lake_count: usize,
    /// Lakes whose area was split into ha/km2 measurements
    pub measured_area_count: usize,
    pub with_lodging_count: usize,
    /// `None` when validation was skipped
    pub invalid_count: Option<usize>,
    pub bytes_written: usize,
    pub finished_at: DateTime<Utc>,
}

/// Convert every row of a table, in order.
pub fn convert_table(table: &Table) -> TransformResult<Vec<Lake>> {
    let columns = ColumnMap::resolve(&table.headers)?;
    table
        .rows
        .iter()
        .map(|row| LakeRow::from_row(row, &columns).and_then(|r| build_lake(&r)))
        .collect()
}

/// Convert CSV text.
pub fn convert_str(content: &str, delimiter: char) -> PipelineResult<Vec<Lake>> {
    let table = read_table(content, delimiter, "utf-8")?;
    Ok(convert_table(&table)?)
}

/// Convert raw CSV bytes, decoding them first.
pub fn convert_bytes(bytes: &[u8], delimiter: char) -> PipelineResult<Vec<Lake>> {
    let table = read_bytes(bytes, delimiter)?;
    Ok(convert_table(&table)?)
}

/// Convert a CSV file.
pub fn convert_file<P: AsRef<Path>>(path: P, delimiter: char) -> PipelineResult<Vec<Lake>> {
    let table = read_file(path, delimiter)?;
    Ok(convert_table(&table)?)
}

/// Serialize lakes as a 2-space indented JSON array.
///
/// Non-ASCII characters are written as-is. No trailing newline.
pub fn to_json(lakes: &[Lake]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(lakes)
}

/// Overwrite `path` with the JSON array. Returns the number of bytes written.
pub fn write_lakes<P: AsRef<Path>>(lakes: &[Lake], path: P) -> PipelineResult<usize> {
    let json = to_json(lakes)?;
    fs::write(path.as_ref(), &json)?;
    Ok(json.len())
}

/// Validate converted lakes against the lake schema.
pub fn validate_converted(lakes: &[Lake]) -> PipelineResult<ValidationReport> {
    let values = lakes
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(validate_lakes(&values)?)
}

/// Full conversion: read, transform, validate, write.
pub fn run(options: &ConvertOptions) -> PipelineResult<ConversionReport> {
    log_info(format!("📖 Reading {}", options.input_path.display()));
    let table = read_file(&options.input_path, options.delimiter)?;
    log_success(format!("Encoding: {}", table.encoding));
    log_success(format!("Read {} rows", table.rows.len()));

    log_info("⚙️  Converting rows...");
    let lakes = convert_table(&table)?;

    let measured_area_count = lakes
        .iter()
        .filter(|l| matches!(l.superficie, Superficie::Mesures(_)))
        .count();
    let with_lodging_count = lakes.iter().filter(|l| l.hebergement.is_some()).count();
    log_success(format!("{} lakes", lakes.len()));
    log_info_indent(format!("{} with measured area", measured_area_count), 1);
    log_info_indent(format!("{} with lodging", with_lodging_count), 1);

    let invalid_count = if options.validate {
        log_info("✔️  Validating records...");
        let report = validate_converted(&lakes)?;
        print_validation_report(&report);
        Some(report.invalid_count)
    } else {
        log_info("(validation skipped)");
        None
    };

    let bytes_written = write_lakes(&lakes, &options.output_path)?;
    log_success(format!("💾 Written to {}", options.output_path.display()));

    Ok(ConversionReport {
        input_path: options.input_path.clone(),
        output_path: options.output_path.clone(),
        encoding: table.encoding,
        lake_count: lakes.len(),
        measured_area_count,
        with_lodging_count,
        invalid_count,
        bytes_written,
        finished_at: Utc::now(),
    })
}

fn print_validation_report(report: &ValidationReport) {
    if report.is_valid() {
        log_success(format!("All {} records valid", report.valid_count));
        return;
    }

    log_warning(format!(
        "{} valid, {} invalid (written anyway)",
        report.valid_count, report.invalid_count
    ));
    for (index, errors) in report.errors.iter().take(3) {
        log_error(format!("Record {}: {}", index, errors.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, TransformError};
    use crate::transform::lake::Column;

    fn header() -> String {
        Column::ALL.map(Column::header).join(";")
    }

    #[test]
    fn test_convert_str_keeps_order() {
        let csv = format!(
            "{}\n\
             Lac A;Zec;-;Mauricie;46.9;-72.8;;Portage;-;;Auto;Canot;;;-;-\n\
             Lac B;SEPAQ;Nord;Mauricie;;;;Portage;Accueil;2 km;Auto;Canot;;Brochet;-;-",
            header()
        );
        let lakes = convert_str(&csv, ';').unwrap();

        assert_eq!(lakes.len(), 2);
        assert_eq!(lakes[0].nom_du_lac, "Lac A");
        assert_eq!(lakes[1].nom_du_lac, "Lac B");
        assert_eq!(lakes[1].espece, vec!["Brochet"]);
    }

    #[test]
    fn test_header_only_gives_empty_array() {
        let lakes = convert_str(&header(), ';').unwrap();
        assert!(lakes.is_empty());
        assert_eq!(to_json(&lakes).unwrap(), "[]");
    }

    #[test]
    fn test_first_bad_row_aborts() {
        let csv = format!(
            "{}\n\
             Lac A;Zec;-;Mauricie;nord;-72.8;;;-;;;;;;-;-\n\
             Lac B;Zec;-;Mauricie;46.9;-72.8;;;-;;;;;;-;-",
            header()
        );
        let err = convert_str(&csv, ';').unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_json_is_literal_utf8() {
        let csv = format!(
            "{}\nLac à l'Épaule;Zec;-;Capitale-Nationale;;;;;-;;;;;Doré;-;-",
            header()
        );
        let json = to_json(&convert_str(&csv, ';').unwrap()).unwrap();

        assert!(json.contains("Lac à l'Épaule"));
        assert!(json.contains("\"Doré\""));
        assert!(!json.contains("\\u"));
        assert!(json.starts_with("[\n  {\n    \"nomDuLac\""));
    }
}
