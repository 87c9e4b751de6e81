//! Transformation module.
//!
//! This module handles CSV rows to lake records:
//! - Area: surface-area text to measurements
//! - Motor: motor restriction text to structured limits
//! - Lake: row to lake record assembly
//! - Catalog: species and camping tables derived from lakes
//! - Pipeline: main conversion pipeline

pub mod area;
pub mod catalog;
pub mod lake;
pub mod motor;
pub mod pipeline;

pub use area::parse_area;
pub use catalog::{build_catalog, classify_espece, normalize_espece};
pub use lake::{build_lake, split_species, Column, ColumnMap, LakeRow, PLACEHOLDER};
pub use motor::parse_motorisation;
pub use pipeline::*;
