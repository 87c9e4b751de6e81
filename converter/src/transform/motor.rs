//! Motor restriction parsing.
//!
//! Recognised shapes:
//!
//! ```text
//! ""                                → {electrique: false}
//! "Moteur électrique seulement"     → {electrique: true}
//! "minimum 5 CV, maximum 10 CV"     → {electrique: false, gas: {min: "5 CV", max: "10 CV"}}
//! "minimum 5 CV"                    → {electrique: false, gas: {min: "5 CV"}}
//! anything else                     → {electrique: false}
//! ```
//!
//! Horsepower bounds stay text; the export mixes units and wording.

use crate::models::Motorisation;

const ELECTRIC_MARKER: &str = "lectrique";
const MINIMUM: &str = "minimum";
const MAXIMUM: &str = "maximum";

/// Parse a motor restriction cell. Never fails.
pub fn parse_motorisation(text: &str) -> Motorisation {
    if text.trim().is_empty() {
        return Motorisation::default();
    }

    // Matches "électrique" without caring how the accent was encoded.
    if text.contains(ELECTRIC_MARKER) {
        return Motorisation::electric();
    }

    let min = segment_after(text, MINIMUM);
    let max = segment_after(text, MAXIMUM);

    match (min, max) {
        (Some(min), Some(max)) => {
            let min = min.split(',').next().unwrap_or(min).trim();
            Motorisation::gas(min, Some(max.trim().to_string()))
        }
        (Some(min), None) => Motorisation::gas(min.trim(), None),
        _ => Motorisation::default(),
    }
}

/// Text after the first occurrence of `needle` up to its next occurrence,
/// ignoring ASCII case.
fn segment_after<'a>(text: &'a str, needle: &str) -> Option<&'a str> {
    let start = find_ignore_ascii_case(text, needle)? + needle.len();
    let rest = &text[start..];
    match find_ignore_ascii_case(rest, needle) {
        Some(end) => Some(&rest[..end]),
        None => Some(rest),
    }
}

/// Byte offset of `needle` in `haystack`, ASCII case-insensitive.
///
/// `needle` must be ASCII so every match starts on a char boundary.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gas;

    #[test]
    fn test_empty_is_not_electric() {
        assert_eq!(parse_motorisation(""), Motorisation::default());
        assert_eq!(parse_motorisation("  "), Motorisation::default());
    }

    #[test]
    fn test_electric() {
        assert_eq!(parse_motorisation("électrique"), Motorisation::electric());
        assert_eq!(
            parse_motorisation("Moteur électrique seulement"),
            Motorisation::electric()
        );
    }

    #[test]
    fn test_electric_marker_is_case_sensitive() {
        assert_eq!(parse_motorisation("ÉLECTRIQUE"), Motorisation::default());
    }

    #[test]
    fn test_min_and_max() {
        assert_eq!(
            parse_motorisation("minimum 5, maximum 10"),
            Motorisation {
                electrique: false,
                gas: Some(Gas {
                    min: "5".to_string(),
                    max: Some("10".to_string()),
                }),
            }
        );
    }

    #[test]
    fn test_min_and_max_with_units_and_case() {
        let m = parse_motorisation("Essence: Minimum 9.9 CV, MAXIMUM 25 CV");
        let gas = m.gas.unwrap();
        assert_eq!(gas.min, "9.9 CV");
        assert_eq!(gas.max.as_deref(), Some("25 CV"));
    }

    #[test]
    fn test_min_only() {
        assert_eq!(
            parse_motorisation("minimum 5"),
            Motorisation {
                electrique: false,
                gas: Some(Gas {
                    min: "5".to_string(),
                    max: None,
                }),
            }
        );
    }

    #[test]
    fn test_max_only_is_default() {
        assert_eq!(parse_motorisation("maximum 10"), Motorisation::default());
    }

    #[test]
    fn test_unrecognised_text_is_default() {
        assert_eq!(parse_motorisation("Aucun moteur"), Motorisation::default());
    }

    #[test]
    fn test_electric_wins_over_bounds() {
        assert_eq!(
            parse_motorisation("électrique ou essence minimum 5"),
            Motorisation::electric()
        );
    }

    #[test]
    fn test_find_ignore_ascii_case_with_accents() {
        assert_eq!(find_ignore_ascii_case("Électrique MINIMUM", "minimum"), Some(12));
        assert_eq!(find_ignore_ascii_case("abc", "minimum"), None);
    }
}
