//! Application configuration loaded from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/blog-posts.db";
pub const DEFAULT_TEST_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub test_database_url: String,
    pub host: IpAddr,
    pub port: u16,
    /// Posts to seed at start-up when the store is empty.
    pub seed_posts: usize,
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            test_database_url: DEFAULT_TEST_DATABASE_URL.to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            seed_posts: 0,
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            test_database_url: lookup("TEST_DATABASE_URL").unwrap_or(defaults.test_database_url),
            host: lookup("HOST").and_then(|h| h.parse().ok()).unwrap_or(defaults.host),
            port: lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
            seed_posts: lookup("SEED_POSTS").and_then(|n| n.parse().ok()).unwrap_or(defaults.seed_posts),
            json_logs: lookup("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.test_database_url, DEFAULT_TEST_DATABASE_URL);
        assert_eq!(config.port, 8080);
        assert_eq!(config.seed_posts, 0);
        assert!(!config.json_logs);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite:///var/lib/posts.db"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("SEED_POSTS", "10"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.database_url, "sqlite:///var/lib/posts.db");
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.port, 9000);
        assert_eq!(config.seed_posts, 10);
        assert!(config.json_logs);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("HOST", "not-an-ip"), ("SEED_POSTS", "-1")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.seed_posts, 0);
    }
}
