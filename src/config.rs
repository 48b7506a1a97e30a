//! Runtime configuration for external store connections.
//!
//! Connection settings are read from process environment variables at
//! construction time. There is no CLI and no config file; the in-memory
//! engines ignore these settings, remote backends consume them.

/// Connection settings for both backends
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Document store base URL
    pub document_url: String,
    /// Scalar cache connection settings
    pub cache: CacheConfig,
}

/// Scalar cache connection settings
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cache server host
    pub host: String,
    /// Cache server port
    pub port: u16,
    /// Optional password
    pub password: Option<String>,
    /// Logical database index within the cache server
    pub database: u8,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            document_url: "http://127.0.0.1:5984".to_string(),
            cache: CacheConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 6379,
            password: None,
            database: 3,
        }
    }
}

impl StoreConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let document_url = std::env::var("DOCMERGE_DOCUMENT_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5984".to_string());

        Self {
            document_url,
            cache: CacheConfig::from_env(),
        }
    }
}

impl CacheConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let host =
            std::env::var("DOCMERGE_CACHE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("DOCMERGE_CACHE_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse()
            .unwrap_or(6379);

        let password = std::env::var("DOCMERGE_CACHE_PASSWORD").ok();

        let database = std::env::var("DOCMERGE_CACHE_DB")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .unwrap_or(3);

        Self {
            host,
            port,
            password,
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-wide, so defaults and overrides are
    // exercised in a single test.
    #[test]
    fn test_from_env() {
        for var in [
            "DOCMERGE_DOCUMENT_URL",
            "DOCMERGE_CACHE_HOST",
            "DOCMERGE_CACHE_PORT",
            "DOCMERGE_CACHE_PASSWORD",
            "DOCMERGE_CACHE_DB",
        ] {
            std::env::remove_var(var);
        }

        let config = StoreConfig::from_env();
        assert_eq!(config.document_url, "http://127.0.0.1:5984");
        assert_eq!(config.cache.host, "127.0.0.1");
        assert_eq!(config.cache.port, 6379);
        assert_eq!(config.cache.password, None);
        assert_eq!(config.cache.database, 3);

        std::env::set_var("DOCMERGE_DOCUMENT_URL", "http://couch:5984");
        std::env::set_var("DOCMERGE_CACHE_HOST", "cache.internal");
        std::env::set_var("DOCMERGE_CACHE_PORT", "6380");
        std::env::set_var("DOCMERGE_CACHE_PASSWORD", "hunter2");
        std::env::set_var("DOCMERGE_CACHE_DB", "7");

        let config = StoreConfig::from_env();
        assert_eq!(config.document_url, "http://couch:5984");
        assert_eq!(config.cache.host, "cache.internal");
        assert_eq!(config.cache.port, 6380);
        assert_eq!(config.cache.password.as_deref(), Some("hunter2"));
        assert_eq!(config.cache.database, 7);

        // Unparseable numbers fall back to defaults.
        std::env::set_var("DOCMERGE_CACHE_PORT", "not-a-port");
        assert_eq!(CacheConfig::from_env().port, 6379);

        for var in [
            "DOCMERGE_DOCUMENT_URL",
            "DOCMERGE_CACHE_HOST",
            "DOCMERGE_CACHE_PORT",
            "DOCMERGE_CACHE_PASSWORD",
            "DOCMERGE_CACHE_DB",
        ] {
            std::env::remove_var(var);
        }
    }
}
