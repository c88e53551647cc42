//! JSON Lookup Backend
//!
//! Implements LookupBackend over a JSON document of IPv4 ranges.
//! Suited to small local datasets and fixtures.

use crate::adapters::outbound::region_tables::{RegionTables, TableMap};
use crate::domain::entities::RawLocationRecord;
use crate::domain::errors::BackendError;
use crate::domain::ports::LookupBackend;
use crate::domain::value_objects::RawText;
use serde::Deserialize;
use std::net::Ipv4Addr;

#[derive(Debug, Deserialize)]
struct RangeEntry {
    start: Ipv4Addr,
    end: Ipv4Addr,
    #[serde(flatten)]
    record: RawLocationRecord,
}

#[derive(Debug, Deserialize)]
struct JsonDatabase {
    ranges: Vec<RangeEntry>,
    timezones: Option<TableMap>,
    regions: Option<TableMap>,
}

/// An inclusive IPv4 range and the record it maps to.
#[derive(Debug, Clone)]
struct IpRange {
    start: u32,
    end: u32,
    record: RawLocationRecord,
}

/// Lookup backend backed by a JSON range file.
///
/// Ranges are kept sorted by start address and never overlap, so a lookup
/// is a single binary search.
#[derive(Debug)]
pub struct JsonLookupBackend {
    ranges: Vec<IpRange>,
    tables: RegionTables,
}

impl JsonLookupBackend {
    /// Load a database from a JSON file.
    ///
    /// `fallback_tables` are used unless the document carries its own
    /// `timezones` or `regions` sections.
    pub fn from_file(path: &str, fallback_tables: RegionTables) -> Result<Self, BackendError> {
        let json = std::fs::read_to_string(path).map_err(|source| BackendError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json_str(&json, fallback_tables)
    }

    /// Parse a database from a JSON document.
    pub fn from_json_str(json: &str, fallback_tables: RegionTables) -> Result<Self, BackendError> {
        let db: JsonDatabase = serde_json::from_str(json)?;

        let tables = match (db.timezones, db.regions) {
            (None, None) => fallback_tables,
            (timezones, regions) => {
                RegionTables::from_maps(timezones.unwrap_or_default(), regions.unwrap_or_default())
            }
        };

        let mut ranges = Vec::with_capacity(db.ranges.len());
        for entry in db.ranges {
            if entry.start > entry.end {
                return Err(BackendError::InvalidRange {
                    start: entry.start,
                    end: entry.end,
                    reason: "start is after end",
                });
            }
            ranges.push(IpRange {
                start: u32::from(entry.start),
                end: u32::from(entry.end),
                record: entry.record,
            });
        }

        ranges.sort_by_key(|r| r.start);

        for pair in ranges.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(BackendError::InvalidRange {
                    start: Ipv4Addr::from(pair[1].start),
                    end: Ipv4Addr::from(pair[1].end),
                    reason: "overlaps a previous range",
                });
            }
        }

        tracing::debug!("loaded {} ip ranges from json database", ranges.len());

        Ok(Self { ranges, tables })
    }

    /// Number of ranges in the database.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl LookupBackend for JsonLookupBackend {
    fn probe(&self) -> Result<(), BackendError> {
        if self.ranges.is_empty() {
            return Err(BackendError::UnsupportedDatabase(
                "json database contains no ranges".to_string(),
            ));
        }
        Ok(())
    }

    fn lookup(&self, ip: Ipv4Addr) -> Option<RawLocationRecord> {
        let ip = u32::from(ip);
        let idx = self.ranges.partition_point(|r| r.start <= ip);
        let range = self.ranges.get(idx.checked_sub(1)?)?;
        (ip <= range.end).then(|| range.record.clone())
    }

    fn timezone(&self, country_code: &str, region_code: &str) -> Option<RawText> {
        self.tables.timezone(country_code, region_code).map(RawText::from)
    }

    fn region_name(&self, country_code: &str, region_code: &str) -> Option<RawText> {
        self.tables.region_name(country_code, region_code).map(RawText::from)
    }
}
