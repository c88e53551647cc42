//! Lookup Backend Port
//!
//! Defines the interface for querying a local geolocation database.

use crate::domain::entities::RawLocationRecord;
use crate::domain::errors::BackendError;
use crate::domain::value_objects::RawText;
use std::net::Ipv4Addr;

/// Read-only access to a local geolocation database.
///
/// This is an outbound port that abstracts the GeoIP database.
/// Implementations may use MaxMind City databases, JSON range files,
/// or other sources. All queries are synchronous and must be safe to
/// call from several threads at once.
pub trait LookupBackend: Send + Sync {
    /// Check once that the backend can actually answer queries.
    ///
    /// Called when a provider is constructed, never per query.
    fn probe(&self) -> Result<(), BackendError> {
        Ok(())
    }

    /// Find the record covering an IPv4 address.
    ///
    /// Returns None if the database holds no record for the address.
    fn lookup(&self, ip: Ipv4Addr) -> Option<RawLocationRecord>;

    /// Timezone for a region of a country, if known.
    fn timezone(&self, country_code: &str, region_code: &str) -> Option<RawText>;

    /// Full region name for a region code of a country, if known.
    fn region_name(&self, country_code: &str, region_code: &str) -> Option<RawText>;
}
