//! Geocoder Port
//!
//! Defines the uniform interface every geocoding provider exposes to the
//! host registry.

use crate::domain::entities::LocationRecord;
use crate::domain::errors::GeocodeError;

/// A pluggable geocoding strategy.
///
/// This is an inbound port: hosts hold providers as `dyn Geocoder` and pick
/// one by [`identifier`](Geocoder::identifier).
pub trait Geocoder: Send + Sync {
    /// Resolve an address to candidate locations.
    fn resolve_forward(&self, address: &str) -> Result<Vec<LocationRecord>, GeocodeError>;

    /// Resolve coordinates back to candidate locations.
    fn resolve_reverse(&self, coordinates: &[f64]) -> Result<Vec<LocationRecord>, GeocodeError>;

    /// Stable name of this provider, used for selection and logging.
    fn identifier(&self) -> &'static str;
}
