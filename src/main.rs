//! geoip-provider - IP geolocation from a local database
//!
//! This is the composition root: it opens the configured backend, builds
//! the provider and resolves every address given on the command line.

use geoip_provider::{
    load_config, BackendKind, Config, GeocodeError, Geocoder, IpLocationProvider,
    JsonLookupBackend, MaxMindLookupBackend, RegionTables,
};

fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging (stderr, stdout carries results)
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let addresses: Vec<String> = std::env::args().skip(1).collect();
    if addresses.is_empty() {
        anyhow::bail!("usage: geoip-provider <address>...");
    }

    let provider = build_provider(&cfg)?;

    tracing::info!(
        "provider {} ready backend={} db={}",
        provider.identifier(),
        cfg.backend,
        cfg.db_path
    );

    let mut failures = 0;
    for address in &addresses {
        match provider.resolve_forward(address) {
            Ok(records) => println!("{}", serde_json::to_string(&records)?),
            Err(e) => {
                failures += 1;
                tracing::debug!("lookup for {} failed: {}", address, e);
                let body = serde_json::json!({ "address": address, "error": e.to_string() });
                println!("{}", body);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} addresses could not be resolved", failures, addresses.len());
    }
    Ok(())
}

/// Open the configured backend and wrap it in a provider.
fn build_provider(cfg: &Config) -> Result<IpLocationProvider, GeocodeError> {
    let tables = match &cfg.regions_path {
        Some(path) => match RegionTables::from_file(path) {
            Ok(t) => {
                tracing::info!("region tables loaded from {}", path);
                t
            }
            Err(e) => {
                tracing::error!("failed to load region tables from {}: {:?}", path, e);
                RegionTables::default()
            }
        },
        None => match RegionTables::embedded() {
            Ok(t) => t,
            Err(e) => {
                tracing::error!("failed to load embedded region tables: {:?}", e);
                RegionTables::default()
            }
        },
    };

    match cfg.backend {
        BackendKind::MaxMind => IpLocationProvider::from_factory(|| {
            MaxMindLookupBackend::from_file(&cfg.db_path, tables)
                .map(|b| b.with_locale(cfg.locale.clone()))
        }),
        BackendKind::Json => {
            IpLocationProvider::from_factory(|| JsonLookupBackend::from_file(&cfg.db_path, tables))
        }
    }
}
