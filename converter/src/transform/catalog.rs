//! Species and camping catalog.
//!
//! The lakes database keeps species and campings in their own tables. This
//! module derives those tables from converted lakes, deduplicated in order of
//! first appearance.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::models::{Camping, Catalog, Categorie, Commodites, Coordonnees, Espece, Lake};

/// Organisation assumed for campings, the export does not say.
pub const DEFAULT_CAMPING_ORGANISME: &str = "privé";

static SALMONIDES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)truite|omble|touladi|moulac").expect("valid salmonid pattern")
});

static CARNASSIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)brochet|doré|maskinongé|achigan").expect("valid predator pattern")
});

/// Family of a species from its common name.
pub fn classify_espece(name: &str) -> Option<Categorie> {
    if SALMONIDES.is_match(name) {
        Some(Categorie::Salmonides)
    } else if CARNASSIERS.is_match(name) {
        Some(Categorie::Carnassiers)
    } else {
        None
    }
}

/// Deduplication key for species names.
pub fn normalize_espece(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Build the species and camping tables from lakes.
pub fn build_catalog(lakes: &[Lake]) -> Catalog {
    Catalog {
        especes: collect_especes(lakes),
        campings: collect_campings(lakes),
    }
}

fn collect_especes(lakes: &[Lake]) -> Vec<Espece> {
    let mut seen = HashSet::new();
    let mut especes = Vec::new();

    for name in lakes.iter().flat_map(|l| &l.espece) {
        let name = name.trim();
        if name.is_empty() || !seen.insert(normalize_espece(name)) {
            continue;
        }
        especes.push(Espece {
            nom_commun: name.to_string(),
            categorie: classify_espece(name),
        });
    }

    especes
}

fn collect_campings(lakes: &[Lake]) -> Vec<Camping> {
    let mut seen = HashSet::new();
    let mut campings = Vec::new();

    for lake in lakes {
        for heb in lake.hebergement.iter().flatten() {
            // Camping rows require numeric coordinates.
            let (Some(latitude), Some(longitude)) =
                (heb.coordonnees.latitude, heb.coordonnees.longitude)
            else {
                continue;
            };

            let key = format!("{}-{}-{}", heb.camping, latitude, longitude);
            if !seen.insert(key) {
                continue;
            }

            campings.push(Camping {
                nom: heb.camping.clone(),
                organisme: DEFAULT_CAMPING_ORGANISME.to_string(),
                coordonnees: Coordonnees {
                    latitude: Some(latitude),
                    longitude: Some(longitude),
                },
                commodites: Commodites::default(),
                region_administrative: lake.region_administrative_quebec.clone(),
            });
        }
    }

    campings
}
