//! GeoIP Provider - IP address geocoding use case
//!
//! Validates the query, runs the primary database lookup and enriches the
//! result with best-effort timezone and region-name lookups.

use crate::domain::entities::{LocationRecord, RawLocationRecord};
use crate::domain::errors::GeocodeError;
use crate::domain::ports::{Geocoder, LookupBackend};
use crate::domain::services::TextNormalizer;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

/// Geocoding provider that resolves IPv4 addresses against a local
/// geolocation database.
///
/// The provider holds no per-query state: one instance can serve any number
/// of concurrent callers as long as its backend allows concurrent reads.
pub struct IpLocationProvider {
    backend: Arc<dyn LookupBackend>,
}

impl IpLocationProvider {
    /// Name under which hosts register this provider.
    pub const NAME: &'static str = "geoip";

    /// Create a provider over an already opened backend.
    ///
    /// Fails with `DependencyUnavailable` if the backend's probe fails.
    pub fn new(backend: Arc<dyn LookupBackend>) -> Result<Self, GeocodeError> {
        if let Err(e) = backend.probe() {
            tracing::debug!("lookup backend probe failed: {}", e);
            return Err(GeocodeError::DependencyUnavailable(e.to_string()));
        }
        Ok(Self { backend })
    }

    /// Create a provider by opening its backend.
    ///
    /// Any failure to open the backend surfaces as `DependencyUnavailable`;
    /// no query is ever attempted against a backend that failed to open.
    pub fn from_factory<B, E, F>(factory: F) -> Result<Self, GeocodeError>
    where
        B: LookupBackend + 'static,
        E: Display,
        F: FnOnce() -> Result<B, E>,
    {
        let backend =
            factory().map_err(|e| GeocodeError::DependencyUnavailable(e.to_string()))?;
        Self::new(Arc::new(backend))
    }

    /// Check that the query is an IPv4 literal this provider can resolve.
    fn parse_query(address: &str) -> Result<Ipv4Addr, GeocodeError> {
        match address.parse::<IpAddr>() {
            Ok(IpAddr::V4(ip)) => Ok(ip),
            Ok(IpAddr::V6(_)) => Err(GeocodeError::UnsupportedInput(
                "the geoip provider does not support IPv6 addresses".to_string(),
            )),
            Err(_) => Err(GeocodeError::UnsupportedInput(
                "the geoip provider does not support street addresses".to_string(),
            )),
        }
    }

    /// Map a raw database record into a normalized location.
    ///
    /// Timezone and region name come from secondary lookups; either may be
    /// missing without failing the query.
    fn build_location(&self, raw: RawLocationRecord) -> LocationRecord {
        let country_code = TextNormalizer::normalize_opt(raw.country_code.as_ref());
        let region_code = TextNormalizer::normalize_opt(raw.region.as_ref());

        let cc = country_code.as_deref().unwrap_or_default();
        let rc = region_code.as_deref().unwrap_or_default();

        let timezone = TextNormalizer::normalize_non_empty(self.backend.timezone(cc, rc).as_ref());
        let region = TextNormalizer::normalize_non_empty(self.backend.region_name(cc, rc).as_ref())
            .or_else(|| region_code.clone());

        LocationRecord {
            latitude: raw.latitude,
            longitude: raw.longitude,
            locality: TextNormalizer::normalize_opt(raw.city.as_ref()),
            postal_code: TextNormalizer::normalize_opt(raw.postal_code.as_ref()),
            region,
            region_code,
            country: TextNormalizer::normalize_opt(raw.country_name.as_ref()),
            country_code,
            timezone,
        }
    }
}

impl Geocoder for IpLocationProvider {
    fn resolve_forward(&self, address: &str) -> Result<Vec<LocationRecord>, GeocodeError> {
        let ip = Self::parse_query(address)?;

        if ip == Ipv4Addr::LOCALHOST {
            return Ok(vec![LocationRecord::localhost()]);
        }

        let raw = match self.backend.lookup(ip) {
            Some(raw) => raw,
            None => {
                tracing::debug!("no database record for {}", ip);
                return Err(GeocodeError::NoResult(format!(
                    "could not find {} ip address in database",
                    address
                )));
            }
        };

        let location = self.build_location(raw);
        tracing::debug!(
            "resolved {} -> country={:?} region={:?} timezone={:?}",
            ip,
            location.country_code,
            location.region_code,
            location.timezone
        );

        Ok(vec![location])
    }

    fn resolve_reverse(&self, _coordinates: &[f64]) -> Result<Vec<LocationRecord>, GeocodeError> {
        Err(GeocodeError::UnsupportedOperation(
            "the geoip provider is not able to do reverse geocoding".to_string(),
        ))
    }

    fn identifier(&self) -> &'static str {
        Self::NAME
    }
}
