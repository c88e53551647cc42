mod json_lookup_backend;
mod maxmind_lookup_backend;
mod region_tables;

pub use json_lookup_backend::JsonLookupBackend;
pub use maxmind_lookup_backend::MaxMindLookupBackend;
pub use region_tables::{RegionTables, TableMap};
