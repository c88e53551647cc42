//! Region Tables
//!
//! Timezone and region-name tables keyed by country and region code.
//! Used by every lookup backend for the secondary enrichment lookups.

use crate::domain::errors::BackendError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Default tables compiled into the binary.
const EMBEDDED_REGIONS: &str = include_str!("../../../data/regions.json");

/// Region key that matches any region of a country in the timezone table.
const ANY_REGION: &str = "*";

/// `{ country_code: { region_code: value } }` as found in JSON documents.
pub type TableMap = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Default, Deserialize)]
struct TablesDocument {
    #[serde(default)]
    timezones: TableMap,
    #[serde(default)]
    regions: TableMap,
}

/// Lookup tables for timezones and region names.
///
/// Keys are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RegionTables {
    timezones: HashMap<(String, String), String>,
    regions: HashMap<(String, String), String>,
}

impl RegionTables {
    /// Load the tables compiled into the binary.
    pub fn embedded() -> Result<Self, BackendError> {
        Self::from_json_str(EMBEDDED_REGIONS)
    }

    /// Load tables from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, BackendError> {
        let json = std::fs::read_to_string(path).map_err(|source| BackendError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Parse tables from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, BackendError> {
        let doc: TablesDocument = serde_json::from_str(json)?;
        Ok(Self::from_maps(doc.timezones, doc.regions))
    }

    /// Build tables from already parsed maps.
    pub fn from_maps(timezones: TableMap, regions: TableMap) -> Self {
        Self {
            timezones: flatten(timezones),
            regions: flatten(regions),
        }
    }

    /// Timezone for a region, falling back to the country-wide entry.
    pub fn timezone(&self, country_code: &str, region_code: &str) -> Option<&str> {
        if country_code.is_empty() {
            return None;
        }
        let country = country_code.to_uppercase();
        self.timezones
            .get(&(country.clone(), region_code.to_uppercase()))
            .or_else(|| self.timezones.get(&(country, ANY_REGION.to_string())))
            .map(String::as_str)
    }

    /// Full name of a region.
    pub fn region_name(&self, country_code: &str, region_code: &str) -> Option<&str> {
        if country_code.is_empty() || region_code.is_empty() {
            return None;
        }
        self.regions
            .get(&(country_code.to_uppercase(), region_code.to_uppercase()))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.timezones.is_empty() && self.regions.is_empty()
    }
}

fn flatten(table: TableMap) -> HashMap<(String, String), String> {
    table
        .into_iter()
        .flat_map(|(country, entries)| {
            let country = country.to_uppercase();
            entries
                .into_iter()
                .map(move |(region, value)| ((country.clone(), region.to_uppercase()), value))
        })
        .collect()
}
