//! Surface area parsing.
//!
//! The export writes areas either as free text or as
//! `"<ha> ha (<km2> km2)"`. Only the combined form is turned into
//! measurements.

use crate::error::AreaError;
use crate::models::{Mesure, Superficie, Unite};

/// Parse a surface-area cell.
///
/// - blank → empty text
/// - contains both `ha` and `km2` → `[ha, km2]` measurements
/// - anything else → the text unchanged
///
/// # Example
/// ```ignore
/// use lakes::transform::parse_area;
///
/// let area = parse_area("150 ha (1.5 km2)").unwrap();
/// assert_eq!(area.hectares(), Some(150.0));
/// assert_eq!(area.km2(), Some(1.5));
/// ```
pub fn parse_area(text: &str) -> Result<Superficie, AreaError> {
    if text.trim().is_empty() {
        return Ok(Superficie::Texte(String::new()));
    }

    if !(text.contains("ha") && text.contains("km2")) {
        return Ok(Superficie::Texte(text.to_string()));
    }

    let ha_raw = text.split("ha").next().unwrap_or(text).trim();
    let hectares =
        parse_number(ha_raw).ok_or_else(|| AreaError::InvalidHectares(ha_raw.to_string()))?;

    // Only the segment between the first and second '(' is considered.
    let segment = text.split('(').nth(1).ok_or(AreaError::MissingParenthesis)?;
    let km2_raw = segment.split("km2").next().unwrap_or(segment).trim();
    let km2 = parse_number(km2_raw)
        .ok_or_else(|| AreaError::InvalidSquareKilometers(km2_raw.to_string()))?;

    Ok(Superficie::Mesures(vec![
        Mesure {
            valeur: hectares,
            unite: Unite::Hectares,
        },
        Mesure {
            valeur: km2,
            unite: Unite::Km2,
        },
    ]))
}

/// Finite decimal number, or `None`.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
