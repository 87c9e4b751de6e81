//! Row to lake record construction.
//!
//! Columns are looked up by header name once per table ([`ColumnMap`]), then
//! every row is borrowed as a [`LakeRow`] and assembled into a [`Lake`].

use crate::error::{TransformError, TransformResult};
use crate::models::{
    Acces, Coordonnees, Embarcation, Hebergement, Juridiction, Lake, Organisme, JURIDICTION_TYPE,
};
use crate::parser::Row;

use super::area::{parse_area, parse_number};
use super::motor::parse_motorisation;

/// "Not applicable" marker used throughout the export.
pub const PLACEHOLDER: &str = "-";

/// Default distance when the source leaves it blank or as a placeholder.
const DEFAULT_DISTANCE: &str = "0";

const COLUMN_COUNT: usize = 16;

// =============================================================================
// Columns
// =============================================================================

/// Logical input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Type,
    Sector,
    Region,
    Latitude,
    Longitude,
    Surface,
    Portage,
    Welcome,
    WelcomeDistance,
    AccessibleVia,
    BoatType,
    MotorType,
    Species,
    Lodging,
    LodgingDistance,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Name,
        Column::Type,
        Column::Sector,
        Column::Region,
        Column::Latitude,
        Column::Longitude,
        Column::Surface,
        Column::Portage,
        Column::Welcome,
        Column::WelcomeDistance,
        Column::AccessibleVia,
        Column::BoatType,
        Column::MotorType,
        Column::Species,
        Column::Lodging,
        Column::LodgingDistance,
    ];

    /// Header as written in the lakes export.
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Nom du lac",
            Column::Type => "Type",
            Column::Sector => "Secteur",
            Column::Region => "Region",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::Surface => "Superficie",
            Column::Portage => "Portage",
            Column::Welcome => "Acceuil",
            Column::WelcomeDistance => "Distance Acceuil",
            Column::AccessibleVia => "Accessible en",
            Column::BoatType => "Type d'embarcation",
            Column::MotorType => "Type de moteur",
            Column::Species => "Espèces",
            Column::Lodging => "Hebergement",
            Column::LodgingDistance => "Distance Hebergement",
        }
    }

    /// Alternate English header.
    pub fn name(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Type => "Type",
            Column::Sector => "Sector",
            Column::Region => "Region",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
            Column::Surface => "Surface",
            Column::Portage => "Portage",
            Column::Welcome => "Welcome",
            Column::WelcomeDistance => "WelcomeDistance",
            Column::AccessibleVia => "AccessibleVia",
            Column::BoatType => "BoatType",
            Column::MotorType => "MotorType",
            Column::Species => "Species",
            Column::Lodging => "Lodging",
            Column::LodgingDistance => "LodgingDistance",
        }
    }

}

/// Position of every [`Column`] in a table's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; COLUMN_COUNT],
}

impl ColumnMap {
    /// Resolve all columns, failing on the first one the header lacks.
    ///
    /// The export's French header wins over the English name wherever
    /// both appear.
    pub fn resolve(headers: &[String]) -> TransformResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let mut indices = [0; COLUMN_COUNT];
        for (slot, column) in indices.iter_mut().zip(Column::ALL) {
            *slot = find(column.header())
                .or_else(|| find(column.name()))
                .ok_or_else(|| TransformError::MissingField {
                    column: column.header().to_string(),
                    line: 1,
                })?;
        }
        Ok(Self { indices })
    }

    fn index(&self, column: Column) -> usize {
        self.indices[column as usize]
    }

    /// Cell of `column` in `row`.
    pub fn get<'r>(&self, row: &'r Row, column: Column) -> TransformResult<&'r str> {
        row.record
            .get(self.index(column))
            .ok_or_else(|| TransformError::MissingField {
                column: column.header().to_string(),
                line: row.line,
            })
    }
}

// =============================================================================
// Row view
// =============================================================================

/// Borrowed view of one input row, one field per logical column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LakeRow<'a> {
    pub line: u64,
    pub name: &'a str,
    pub lake_type: &'a str,
    pub sector: &'a str,
    pub region: &'a str,
    pub latitude: &'a str,
    pub longitude: &'a str,
    pub surface: &'a str,
    pub portage: &'a str,
    pub welcome: &'a str,
    pub welcome_distance: &'a str,
    pub accessible_via: &'a str,
    pub boat_type: &'a str,
    pub motor_type: &'a str,
    pub species: &'a str,
    pub lodging: &'a str,
    pub lodging_distance: &'a str,
}

impl<'a> LakeRow<'a> {
    /// Pick every field out of a raw row.
    pub fn from_row(row: &'a Row, columns: &ColumnMap) -> TransformResult<Self> {
        let get = |column| columns.get(row, column);
        Ok(Self {
            line: row.line,
            name: get(Column::Name)?,
            lake_type: get(Column::Type)?,
            sector: get(Column::Sector)?,
            region: get(Column::Region)?,
            latitude: get(Column::Latitude)?,
            longitude: get(Column::Longitude)?,
            surface: get(Column::Surface)?,
            portage: get(Column::Portage)?,
            welcome: get(Column::Welcome)?,
            welcome_distance: get(Column::WelcomeDistance)?,
            accessible_via: get(Column::AccessibleVia)?,
            boat_type: get(Column::BoatType)?,
            motor_type: get(Column::MotorType)?,
            species: get(Column::Species)?,
            lodging: get(Column::Lodging)?,
            lodging_distance: get(Column::LodgingDistance)?,
        })
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Build the lake record for one row.
pub fn build_lake(row: &LakeRow<'_>) -> TransformResult<Lake> {
    let coordonnees = Coordonnees {
        latitude: parse_coordinate(Column::Latitude, row.latitude, row.line)?,
        longitude: parse_coordinate(Column::Longitude, row.longitude, row.line)?,
    };

    let superficie = parse_area(row.surface).map_err(|e| {
        TransformError::format(Column::Surface.header(), row.line, row.surface, e.to_string())
    })?;

    let hebergement = if row.lodging.is_empty() || row.lodging == PLACEHOLDER {
        None
    } else {
        Some(vec![Hebergement {
            camping: row.lodging.to_string(),
            distance_camping_acceuil: if row.lodging_distance == PLACEHOLDER {
                DEFAULT_DISTANCE.to_string()
            } else {
                row.lodging_distance.to_string()
            },
            coordonnees,
        }])
    };

    Ok(Lake {
        nom_du_lac: row.name.to_string(),
        juridiction: Juridiction {
            kind: JURIDICTION_TYPE.to_string(),
            organisme: Organisme::from_type(row.lake_type),
            site: non_placeholder(row.sector),
        },
        region_administrative_quebec: row.region.to_string(),
        coordonnees,
        superficie,
        acces: Acces {
            portage: row.portage.to_string(),
            acceuil: non_placeholder(row.welcome),
            distance_acceuil_lac: if row.welcome_distance.is_empty() {
                DEFAULT_DISTANCE.to_string()
            } else {
                row.welcome_distance.to_string()
            },
            accessible: row.accessible_via.to_lowercase(),
        },
        embarcation: Embarcation {
            kind: row.boat_type.to_string(),
            motorisation: parse_motorisation(row.motor_type),
        },
        espece: split_species(row.species),
        hebergement,
    })
}

/// `None` for the placeholder, the value otherwise (blank included).
fn non_placeholder(value: &str) -> Option<String> {
    (value != PLACEHOLDER).then(|| value.to_string())
}

/// Comma-separated species, each trimmed. Empty cell gives no species.
pub fn split_species(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}

/// Empty cell gives `None`; anything else must be a number.
fn parse_coordinate(column: Column, raw: &str, line: u64) -> TransformResult<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_number(raw.trim())
        .map(Some)
        .ok_or_else(|| TransformError::format(column.header(), line, raw, "not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mesure, Motorisation, Superficie, Unite};
    use crate::parser::read_table;

    fn sample_row() -> LakeRow<'static> {
        LakeRow {
            line: 2,
            name: "Lac à la Truite",
            lake_type: "SEPAQ Nord",
            sector: "-",
            region: "Saguenay–Lac-Saint-Jean",
            latitude: "48.5",
            longitude: "-71.2",
            surface: "150 ha (1.5 km2)",
            portage: "Aucune marche d'approche nécessaire",
            welcome: "Poste d'accueil Belle-Rivière",
            welcome_distance: "",
            accessible_via: "Auto",
            boat_type: "Chaloupe",
            motor_type: "minimum 5, maximum 10",
            species: "Truite, Doré",
            lodging: "-",
            lodging_distance: "-",
        }
    }

    #[test]
    fn test_sepaq_scenario() {
        let lake = build_lake(&sample_row()).unwrap();

        assert_eq!(lake.juridiction.kind, "gouvernementale");
        assert_eq!(lake.juridiction.organisme, Organisme::Sepaq);
        assert_eq!(lake.juridiction.site, None);
        assert_eq!(lake.coordonnees.latitude, Some(48.5));
        assert_eq!(lake.coordonnees.longitude, Some(-71.2));
        assert_eq!(
            lake.superficie,
            Superficie::Mesures(vec![
                Mesure { valeur: 150.0, unite: Unite::Hectares },
                Mesure { valeur: 1.5, unite: Unite::Km2 },
            ])
        );
    }

    #[test]
    fn test_access_defaults() {
        let lake = build_lake(&sample_row()).unwrap();

        assert_eq!(lake.acces.distance_acceuil_lac, "0");
        assert_eq!(lake.acces.accessible, "auto");
        assert_eq!(lake.acces.acceuil.as_deref(), Some("Poste d'accueil Belle-Rivière"));

        let row = LakeRow { welcome: "-", ..sample_row() };
        let lake = build_lake(&row).unwrap();
        assert_eq!(lake.acces.acceuil, None);
    }

    #[test]
    fn test_accessible_is_lowercased() {
        let row = LakeRow {
            accessible_via: "Véhicule Utilitaire Sport (VUS)",
            ..sample_row()
        };
        let lake = build_lake(&row).unwrap();
        assert_eq!(lake.acces.accessible, "véhicule utilitaire sport (vus)");
    }

    #[test]
    fn test_territoire_and_site() {
        let row = LakeRow {
            lake_type: "Zec",
            sector: "Secteur Nord",
            ..sample_row()
        };
        let lake = build_lake(&row).unwrap();
        assert_eq!(lake.juridiction.organisme, Organisme::Territoire);
        assert_eq!(lake.juridiction.site.as_deref(), Some("Secteur Nord"));
    }

    #[test]
    fn test_species() {
        assert_eq!(split_species("Truite, Doré"), vec!["Truite", "Doré"]);
        assert!(split_species("").is_empty());
        assert_eq!(split_species("Brochet"), vec!["Brochet"]);
    }

    #[test]
    fn test_motorisation_is_parsed() {
        let lake = build_lake(&sample_row()).unwrap();
        assert_eq!(
            lake.embarcation.motorisation,
            Motorisation::gas("5", Some("10".to_string()))
        );
        assert_eq!(lake.embarcation.kind, "Chaloupe");
    }

    #[test]
    fn test_lodging_absent_for_placeholder_or_empty() {
        assert!(build_lake(&sample_row()).unwrap().hebergement.is_none());

        let row = LakeRow { lodging: "", ..sample_row() };
        assert!(build_lake(&row).unwrap().hebergement.is_none());
    }

    #[test]
    fn test_lodging_present() {
        let row = LakeRow {
            lodging: "Camping du Lac",
            lodging_distance: "-",
            ..sample_row()
        };
        let lake = build_lake(&row).unwrap();
        let heb = lake.hebergement.unwrap();

        assert_eq!(heb.len(), 1);
        assert_eq!(heb[0].camping, "Camping du Lac");
        assert_eq!(heb[0].distance_camping_acceuil, "0");
        assert_eq!(heb[0].coordonnees, lake.coordonnees);

        let row = LakeRow {
            lodging: "Camping du Lac",
            lodging_distance: "12 km",
            ..sample_row()
        };
        let heb = build_lake(&row).unwrap().hebergement.unwrap();
        assert_eq!(heb[0].distance_camping_acceuil, "12 km");
    }

    #[test]
    fn test_empty_coordinates_are_null() {
        let row = LakeRow { latitude: "", longitude: "", ..sample_row() };
        let lake = build_lake(&row).unwrap();
        assert_eq!(lake.coordonnees, Coordonnees::default());
    }

    #[test]
    fn test_bad_latitude_is_format_error() {
        let row = LakeRow { latitude: "48,5", ..sample_row() };
        let err = build_lake(&row).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Format { ref column, line: 2, .. } if column == "latitude"
        ));
    }

    #[test]
    fn test_bad_area_is_format_error() {
        let row = LakeRow { surface: "vaste ha (1 km2)", ..sample_row() };
        let err = build_lake(&row).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Format { ref column, .. } if column == "Superficie"
        ));
    }

    #[test]
    fn test_column_map_accepts_english_headers() {
        let headers: Vec<String> = Column::ALL.iter().map(|c| c.name().to_string()).collect();
        assert!(ColumnMap::resolve(&headers).is_ok());
    }

    #[test]
    fn test_column_map_prefers_french_header() {
        let mut headers: Vec<String> = vec!["Sector".to_string()];
        headers.extend(Column::ALL.iter().map(|c| c.header().to_string()));
        let columns = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(columns.index(Column::Sector), 3);

        let mut values = vec!["EN-SECTOR"];
        values.extend(Column::ALL.iter().map(|c| match c {
            Column::Sector => "FR-SECTOR",
            _ => "",
        }));
        let csv = format!("{}\n{}", headers.join(";"), values.join(";"));
        let table = read_table(&csv, ';', "utf-8").unwrap();
        let row = LakeRow::from_row(&table.rows[0], &columns).unwrap();
        assert_eq!(row.sector, "FR-SECTOR");

        let lake = build_lake(&row).unwrap();
        assert_eq!(lake.juridiction.site.as_deref(), Some("FR-SECTOR"));
    }

    #[test]
    fn test_column_map_missing_header() {
        let headers: Vec<String> = Column::ALL
            .iter()
            .filter(|c| **c != Column::Species)
            .map(|c| c.header().to_string())
            .collect();
        let err = ColumnMap::resolve(&headers).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingField { ref column, line: 1 } if column == "Espèces"
        ));
    }

    #[test]
    fn test_short_row_is_missing_field() {
        let header = Column::ALL.map(Column::header).join(";");
        let csv = format!("{}\nLac Court;Zec", header);
        let table = read_table(&csv, ';', "utf-8").unwrap();
        let columns = ColumnMap::resolve(&table.headers).unwrap();

        let err = LakeRow::from_row(&table.rows[0], &columns).unwrap_err();
        assert!(matches!(err, TransformError::MissingField { line: 2, .. }));
    }
}
