//! MaxMind Lookup Backend
//!
//! Implements LookupBackend using a MaxMind City database
//! (GeoLite2-City / GeoIP2-City).

use crate::adapters::outbound::region_tables::RegionTables;
use crate::domain::entities::RawLocationRecord;
use crate::domain::errors::BackendError;
use crate::domain::ports::LookupBackend;
use crate::domain::value_objects::RawText;
use maxminddb::Reader;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

/// Locale used when the configured one has no name for a place.
const FALLBACK_LOCALE: &str = "en";

#[derive(Debug, Default, Deserialize)]
struct Named {
    #[serde(default)]
    names: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct Coded {
    iso_code: Option<String>,
    #[serde(default)]
    names: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Postal {
    code: Option<String>,
}

/// The subset of a City record this backend reads.
#[derive(Debug, Default, Deserialize)]
struct CityResponse {
    city: Option<Named>,
    country: Option<Coded>,
    location: Option<Location>,
    postal: Option<Postal>,
    #[serde(default)]
    subdivisions: Vec<Coded>,
}

/// MaxMind City database backend.
///
/// Primary lookups read the City database; timezone and region-name
/// lookups are answered from [`RegionTables`].
pub struct MaxMindLookupBackend {
    reader: Arc<Reader<Vec<u8>>>,
    tables: RegionTables,
    locale: String,
}

impl MaxMindLookupBackend {
    /// Load a City database from a file path.
    pub fn from_file(path: &str, tables: RegionTables) -> Result<Self, BackendError> {
        let reader = Reader::open_readfile(path)
            .map_err(|e| BackendError::MaxMind(format!("{}: {}", path, e)))?;
        Ok(Self::with_reader(reader, tables))
    }

    /// Load a City database from an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>, tables: RegionTables) -> Result<Self, BackendError> {
        let reader = Reader::from_source(bytes).map_err(|e| BackendError::MaxMind(e.to_string()))?;
        Ok(Self::with_reader(reader, tables))
    }

    fn with_reader(reader: Reader<Vec<u8>>, tables: RegionTables) -> Self {
        Self {
            reader: Arc::new(reader),
            tables,
            locale: FALLBACK_LOCALE.to_string(),
        }
    }

    /// Use another locale for city, country and region names.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Database type from the file metadata, e.g. `GeoLite2-City`.
    pub fn database_type(&self) -> &str {
        &self.reader.metadata.database_type
    }
}

/// Only City databases carry locality and coordinates.
fn check_database_type(database_type: &str) -> Result<(), BackendError> {
    if database_type.contains("City") {
        Ok(())
    } else {
        Err(BackendError::UnsupportedDatabase(format!(
            "{} is not a City database",
            database_type
        )))
    }
}

fn localized<'a>(names: &'a BTreeMap<String, String>, locale: &str) -> Option<&'a str> {
    names
        .get(locale)
        .or_else(|| names.get(FALLBACK_LOCALE))
        .map(String::as_str)
}

/// Map a City response into a raw record.
///
/// A response without country data is treated as no record at all.
fn to_raw_record(resp: CityResponse, locale: &str) -> Option<RawLocationRecord> {
    let country = resp.country?;
    let location = resp.location.unwrap_or_default();
    let region = resp.subdivisions.into_iter().next().and_then(|s| s.iso_code);

    Some(RawLocationRecord {
        country_code: country.iso_code.as_deref().map(RawText::from),
        region: region.map(RawText::from),
        city: resp
            .city
            .as_ref()
            .and_then(|c| localized(&c.names, locale))
            .map(RawText::from),
        postal_code: resp.postal.and_then(|p| p.code).map(RawText::from),
        latitude: location.latitude,
        longitude: location.longitude,
        country_name: localized(&country.names, locale).map(RawText::from),
    })
}

impl LookupBackend for MaxMindLookupBackend {
    fn probe(&self) -> Result<(), BackendError> {
        check_database_type(self.database_type())
    }

    fn lookup(&self, ip: Ipv4Addr) -> Option<RawLocationRecord> {
        let resp: CityResponse = match self.reader.lookup(IpAddr::V4(ip)) {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!("maxmind lookup for {} failed: {}", ip, e);
                return None;
            }
        };
        to_raw_record(resp, &self.locale)
    }

    fn timezone(&self, country_code: &str, region_code: &str) -> Option<RawText> {
        self.tables.timezone(country_code, region_code).map(RawText::from)
    }

    fn region_name(&self, country_code: &str, region_code: &str) -> Option<RawText> {
        self.tables.region_name(country_code, region_code).map(RawText::from)
    }
}
