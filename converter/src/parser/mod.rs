//! CSV reader with encoding fallback.
//!
//! Reads a delimited table with a header row into a [`Table`] of raw string
//! records. Values are kept verbatim; mapping columns to lake fields happens
//! in [`crate::transform::lake`].

use csv::{ReaderBuilder, StringRecord};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Delimiter used by the lakes export.
pub const DEFAULT_DELIMITER: char = ';';

/// A data row with the line it was read from.
#[derive(Debug, Clone)]
pub struct Row {
    /// 1-based line number in the source (the header is line 1).
    pub line: u64,
    pub record: StringRecord,
}

/// Parsed table with metadata
#[derive(Debug, Clone)]
pub struct Table {
    /// Column headers, in file order
    pub headers: Vec<String>,
    /// Data rows, in file order
    pub rows: Vec<Row>,
    /// Detected or used encoding
    pub encoding: String,
    /// Delimiter used
    pub delimiter: char,
}

impl Table {
    /// Rows as JSON objects keyed by header.
    ///
    /// Missing trailing cells become empty strings, extra cells are dropped.
    pub fn to_json_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (i, header) in self.headers.iter().enumerate() {
                    let value = row.record.get(i).unwrap_or("");
                    obj.insert(header.clone(), Value::String(value.to_string()));
                }
                Value::Object(obj)
            })
            .collect()
    }
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => std::str::from_utf8(bytes)
            .map_err(|e| CsvError::Encoding(e.to_string()))?
            .to_string(),
        // Latin-1 labels decode as CP1252, its superset for 0x80-0x9F.
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => {
            return Err(CsvError::Encoding(format!("unsupported encoding '{}'", other)));
        }
    };
    Ok(strip_bom(&text).to_string())
}

/// Decode bytes, trusting UTF-8 when it is valid and sniffing otherwise.
///
/// Returns the text and the encoding name used.
pub fn decode_auto(bytes: &[u8]) -> CsvResult<(String, String)> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok((strip_bom(text).to_string(), "utf-8".to_string()));
    }
    let encoding = detect_encoding(bytes);
    let text = match decode_content(bytes, &encoding) {
        Ok(text) => text,
        // Legacy exports come out of Excel, CP1252 covers Latin-1.
        Err(_) => decode_content(bytes, "windows-1252")?,
    };
    Ok((text, encoding))
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Read delimited text into a [`Table`].
///
/// # Example
/// ```ignore
/// use lakes::parser::read_table;
///
/// let table = read_table("Nom du lac;Region\nLac Vert;Mauricie", ';', "utf-8").unwrap();
/// assert_eq!(table.rows.len(), 1);
/// assert_eq!(table.headers, vec!["Nom du lac", "Region"]);
/// ```
pub fn read_table(content: &str, delimiter: char, encoding: &str) -> CsvResult<Table> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }
    if !delimiter.is_ascii() {
        return Err(CsvError::Parse {
            line: 0,
            message: format!("delimiter '{}' is not a single-byte character", delimiter),
        });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(Row { line, record });
    }

    Ok(Table {
        headers,
        rows,
        encoding: encoding.to_string(),
        delimiter,
    })
}

/// Read CSV bytes, decoding them first.
pub fn read_bytes(bytes: &[u8], delimiter: char) -> CsvResult<Table> {
    let (content, encoding) = decode_auto(bytes)?;
    read_table(&content, delimiter, &encoding)
}

/// Read a CSV file from disk.
pub fn read_file<P: AsRef<Path>>(path: P, delimiter: char) -> CsvResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    read_bytes(&bytes, delimiter)
}
