//! Domain layer: entities, value objects, ports and pure services.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{LocationRecord, RawLocationRecord};
pub use errors::{BackendError, GeocodeError};
pub use value_objects::RawText;
