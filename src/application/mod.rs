mod geoip_provider;

pub use geoip_provider::IpLocationProvider;
