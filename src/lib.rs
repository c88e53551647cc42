//! geoip-provider Library
//!
//! A geocoding provider that resolves IPv4 addresses to approximate
//! locations using a local geolocation database.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::outbound::{JsonLookupBackend, MaxMindLookupBackend, RegionTables};
pub use application::IpLocationProvider;
pub use config::{load_config, BackendKind, Config};
pub use domain::entities::{LocationRecord, RawLocationRecord};
pub use domain::errors::{BackendError, GeocodeError};
pub use domain::ports::{Geocoder, LookupBackend};
