//! Domain Entities - Core geocoding objects
//!
//! These entities represent what a lookup produces: the raw record stored in
//! the geolocation database and the normalized location handed to callers.

use crate::domain::value_objects::RawText;
use serde::{Deserialize, Serialize};

/// Placeholder used for every named field of the loopback result.
pub const LOCALHOST_NAME: &str = "localhost";

/// A normalized geographic location resolved for a single query.
///
/// Records are plain values: they are built once per response and never
/// shared between queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Approximate latitude
    pub latitude: Option<f64>,
    /// Approximate longitude
    pub longitude: Option<f64>,
    /// City name
    pub locality: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Full region name, or the raw region code when no name is known
    pub region: Option<String>,
    /// Region code exactly as stored in the database
    pub region_code: Option<String>,
    /// Full country name
    pub country: Option<String>,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: Option<String>,
    /// IANA timezone resolved from country and region
    pub timezone: Option<String>,
}

impl LocationRecord {
    /// The fixed result returned for the loopback address.
    ///
    /// Named fields are set to `"localhost"`; coordinates, codes and
    /// timezone are absent.
    pub fn localhost() -> Self {
        Self {
            locality: Some(LOCALHOST_NAME.to_string()),
            region: Some(LOCALHOST_NAME.to_string()),
            country: Some(LOCALHOST_NAME.to_string()),
            ..Self::default()
        }
    }
}

/// A record as returned by the primary database lookup.
///
/// Any field may be missing: not every network has city or postal data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLocationRecord {
    pub country_code: Option<RawText>,
    pub region: Option<RawText>,
    pub city: Option<RawText>,
    pub postal_code: Option<RawText>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country_name: Option<RawText>,
}
