//! Domain models for the lakes conversion pipeline.
//!
//! The output document mirrors what the lakes web app loads into its
//! database, so field names are the French camelCase keys it expects:
//!
//! - [`Lake`] - one fishing lake with its access and regulatory metadata
//! - [`Superficie`] - surface area, raw text or hectare/km2 measurements
//! - [`Motorisation`] - electric/gas motor restrictions
//! - [`Hebergement`] - lodging attached to a lake
//! - [`Catalog`] - deduplicated species and campings derived from lakes

use serde::{Deserialize, Serialize};

/// Constant `juridiction.type` for every lake in the export.
pub const JURIDICTION_TYPE: &str = "gouvernementale";

// =============================================================================
// Coordinates
// =============================================================================

/// Latitude/longitude pair, each side nullable when the source cell is empty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Coordonnees {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// =============================================================================
// Jurisdiction
// =============================================================================

/// Organisation managing the lake.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Organisme {
    #[serde(rename = "SEPAQ")]
    Sepaq,
    #[serde(rename = "Territoire")]
    Territoire,
}

impl Organisme {
    /// SEPAQ when the lake type mentions it, otherwise a free territory.
    pub fn from_type(lake_type: &str) -> Self {
        if lake_type.contains("SEPAQ") {
            Self::Sepaq
        } else {
            Self::Territoire
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Juridiction {
    #[serde(rename = "type")]
    pub kind: String,
    pub organisme: Organisme,
    pub site: Option<String>,
}

// =============================================================================
// Surface area
// =============================================================================

/// Unit of a [`Mesure`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Unite {
    #[serde(rename = "ha")]
    Hectares,
    #[serde(rename = "km2")]
    Km2,
}

/// A numeric quantity with its unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Mesure {
    pub valeur: f64,
    pub unite: Unite,
}

/// Surface area of a lake.
///
/// Serialized untagged: either the source text as-is, or the
/// `[ha, km2]` measurement pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Superficie {
    Texte(String),
    Mesures(Vec<Mesure>),
}

impl Superficie {
    /// Hectare measurement, when the area was parsed.
    pub fn hectares(&self) -> Option<f64> {
        self.find(Unite::Hectares)
    }

    /// Square kilometer measurement, when the area was parsed.
    pub fn km2(&self) -> Option<f64> {
        self.find(Unite::Km2)
    }

    fn find(&self, unite: Unite) -> Option<f64> {
        match self {
            Self::Texte(_) => None,
            Self::Mesures(m) => m.iter().find(|m| m.unite == unite).map(|m| m.valeur),
        }
    }
}

// =============================================================================
// Access
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Acces {
    pub portage: String,
    pub acceuil: Option<String>,
    pub distance_acceuil_lac: String,
    pub accessible: String,
}

// =============================================================================
// Boat & motor
// =============================================================================

/// Horsepower bounds for gas motors, kept as source text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gas {
    pub min: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max: Option<String>,
}

/// Motor restrictions on a lake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Motorisation {
    pub electrique: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gas: Option<Gas>,
}

impl Motorisation {
    pub fn electric() -> Self {
        Self {
            electrique: true,
            gas: None,
        }
    }

    pub fn gas(min: impl Into<String>, max: Option<String>) -> Self {
        Self {
            electrique: false,
            gas: Some(Gas {
                min: min.into(),
                max,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embarcation {
    #[serde(rename = "type")]
    pub kind: String,
    pub motorisation: Motorisation,
}

// =============================================================================
// Lodging
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hebergement {
    pub camping: String,
    pub distance_camping_acceuil: String,
    pub coordonnees: Coordonnees,
}

// =============================================================================
// Lake
// =============================================================================

/// One fishing lake, as loaded into the document database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lake {
    pub nom_du_lac: String,
    pub juridiction: Juridiction,
    pub region_administrative_quebec: String,
    pub coordonnees: Coordonnees,
    pub superficie: Superficie,
    pub acces: Acces,
    pub embarcation: Embarcation,
    pub espece: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hebergement: Option<Vec<Hebergement>>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Broad family of a fish species.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Categorie {
    #[serde(rename = "salmonidés")]
    Salmonides,
    #[serde(rename = "carnassiers")]
    Carnassiers,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Espece {
    pub nom_commun: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub categorie: Option<Categorie>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Commodites {
    pub eau: bool,
    pub electricite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Camping {
    pub nom: String,
    pub organisme: String,
    pub coordonnees: Coordonnees,
    pub commodites: Commodites,
    pub region_administrative: String,
}

/// Species and campings shared across lakes, deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Catalog {
    pub especes: Vec<Espece>,
    pub campings: Vec<Camping>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_organisme_from_type() {
        assert_eq!(Organisme::from_type("SEPAQ Nord"), Organisme::Sepaq);
        assert_eq!(Organisme::from_type("Réserve faunique"), Organisme::Territoire);
        assert_eq!(Organisme::from_type("sepaq"), Organisme::Territoire);
    }

    #[test]
    fn test_superficie_untagged() {
        let texte = Superficie::Texte("environ 12 acres".into());
        assert_eq!(serde_json::to_value(&texte).unwrap(), json!("environ 12 acres"));

        let mesures = Superficie::Mesures(vec![
            Mesure { valeur: 150.0, unite: Unite::Hectares },
            Mesure { valeur: 1.5, unite: Unite::Km2 },
        ]);
        assert_eq!(
            serde_json::to_value(&mesures).unwrap(),
            json!([{"valeur": 150.0, "unite": "ha"}, {"valeur": 1.5, "unite": "km2"}])
        );
        assert_eq!(mesures.hectares(), Some(150.0));
        assert_eq!(mesures.km2(), Some(1.5));
        assert_eq!(texte.km2(), None);
    }

    #[test]
    fn test_motorisation_skips_absent_gas() {
        let json = serde_json::to_string(&Motorisation::default()).unwrap();
        assert_eq!(json, r#"{"electrique":false}"#);

        let json = serde_json::to_string(&Motorisation::gas("5", None)).unwrap();
        assert_eq!(json, r#"{"electrique":false,"gas":{"min":"5"}}"#);
    }

    #[test]
    fn test_nullable_coordinates() {
        let json = serde_json::to_string(&Coordonnees::default()).unwrap();
        assert_eq!(json, r#"{"latitude":null,"longitude":null}"#);
    }

    #[test]
    fn test_categorie_names() {
        assert_eq!(
            serde_json::to_value(Categorie::Salmonides).unwrap(),
            json!("salmonidés")
        );
    }
}
