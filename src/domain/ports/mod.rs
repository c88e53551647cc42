mod geocoder;
mod lookup_backend;

pub use geocoder::Geocoder;
pub use lookup_backend::LookupBackend;
