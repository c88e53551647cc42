use serde::Deserialize;

/// Which database format the provider reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// MaxMind City `.mmdb` database
    MaxMind,
    /// JSON range file
    Json,
}

impl BackendKind {
    /// Parse a backend name, falling back to MaxMind.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::MaxMind, // fallback
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxMind => "maxmind",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub db_path: String,
    pub regions_path: Option<String>,
    pub locale: String,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::MaxMind,
            db_path: "GeoLite2-City.mmdb".to_string(),
            regions_path: None,
            locale: "en".to_string(),
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let backend = std::env::var("GEOIP_BACKEND")
        .map(|v| BackendKind::from_str(&v))
        .unwrap_or(BackendKind::MaxMind);

    let db_path = std::env::var("GEOIP_DB_PATH")
        .unwrap_or_else(|_| "GeoLite2-City.mmdb".to_string());

    let regions_path = std::env::var("GEOIP_REGIONS_PATH").ok();

    let locale = std::env::var("GEOIP_LOCALE")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "en".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        backend,
        db_path,
        regions_path,
        locale,
        debug,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests below share process-wide environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.backend, BackendKind::MaxMind);
        assert_eq!(cfg.db_path, "GeoLite2-City.mmdb");
        assert_eq!(cfg.locale, "en");
        assert!(cfg.regions_path.is_none());
        assert!(!cfg.debug);
    }

    #[test]
    fn test_load_config_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::remove_var("GEOIP_BACKEND");
        std::env::remove_var("GEOIP_DB_PATH");
        std::env::remove_var("GEOIP_REGIONS_PATH");
        std::env::remove_var("GEOIP_LOCALE");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.backend, BackendKind::MaxMind);
        assert_eq!(cfg.db_path, "GeoLite2-City.mmdb");
        assert!(cfg.regions_path.is_none());
        assert_eq!(cfg.locale, "en");
    }

    #[test]
    fn test_load_config_with_json_backend() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("GEOIP_BACKEND", "JSON");
        std::env::set_var("GEOIP_DB_PATH", "/var/lib/geoip/ranges.json");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.backend, BackendKind::Json);
        assert_eq!(cfg.db_path, "/var/lib/geoip/ranges.json");
        std::env::remove_var("GEOIP_BACKEND");
        std::env::remove_var("GEOIP_DB_PATH");
    }

    #[test]
    fn test_load_config_unknown_backend_uses_maxmind() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("GEOIP_BACKEND", "ip2location");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.backend, BackendKind::MaxMind);
        std::env::remove_var("GEOIP_BACKEND");
    }

    #[test]
    fn test_load_config_with_regions_path() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("GEOIP_REGIONS_PATH", "/etc/geoip/regions.json");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.regions_path, Some("/etc/geoip/regions.json".to_string()));
        std::env::remove_var("GEOIP_REGIONS_PATH");
    }

    #[test]
    fn test_load_config_with_locale() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("GEOIP_LOCALE", "pt-BR");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.locale, "pt-BR");
        std::env::remove_var("GEOIP_LOCALE");
    }

    #[test]
    fn test_load_config_empty_locale_uses_default() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("GEOIP_LOCALE", "");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.locale, "en");
        std::env::remove_var("GEOIP_LOCALE");
    }

    #[test]
    fn test_load_config_with_debug() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("DEBUG", "1");
        let cfg = load_config().unwrap();
        assert!(cfg.debug);
        std::env::remove_var("DEBUG");
    }

    #[test]
    fn test_backend_kind_from_str() {
        let tests = vec![
            ("maxmind", BackendKind::MaxMind),
            ("json", BackendKind::Json),
            (" Json ", BackendKind::Json),
            ("", BackendKind::MaxMind),
        ];

        for (input, expected) in tests {
            assert_eq!(BackendKind::from_str(input), expected);
        }
    }

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::MaxMind.to_string(), "maxmind");
        assert_eq!(BackendKind::Json.to_string(), "json");
    }

    #[test]
    fn test_config_clone() {
        let cfg = Config::default();
        let cloned = cfg.clone();
        assert_eq!(cfg.db_path, cloned.db_path);
        assert_eq!(cfg.backend, cloned.backend);
    }
}
