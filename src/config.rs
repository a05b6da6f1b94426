//! Server configuration read from the environment.

use std::env;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_IMAGE_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_IMAGE_MAX_BYTES: u64 = 5 * 1024 * 1024;
const DEFAULT_DOCUMENT_CAPACITY: u64 = 100;
const DEFAULT_DOCUMENT_TTL_SECS: u64 = 10 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix of the URLs handed out for generated documents.
    pub public_base_url: String,
    pub allowed_origins: Vec<String>,
    pub image_fetch_timeout: Duration,
    pub image_max_bytes: u64,
    /// When set, images are only fetched from these hosts.
    pub image_allowed_hosts: Option<Vec<String>>,
    /// When set, documents may only be moved into these folders.
    pub output_folders: Option<Vec<String>>,
    /// Generated documents kept for inspection.
    pub document_capacity: u64,
    pub document_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match read("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("PORT '{}' is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let number = |key: &str, default: u64| match read(key) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("{} '{}' is not a number, using {}", key, raw, default);
                default
            }),
            None => default,
        };

        Self {
            host: read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            public_base_url: read("PUBLIC_BASE_URL").unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
            allowed_origins: split_list(&read("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())),
            image_fetch_timeout: Duration::from_secs(number("IMAGE_FETCH_TIMEOUT_SECS", DEFAULT_IMAGE_FETCH_TIMEOUT_SECS)),
            image_max_bytes: number("IMAGE_MAX_BYTES", DEFAULT_IMAGE_MAX_BYTES),
            image_allowed_hosts: read("IMAGE_ALLOWED_HOSTS").map(|raw| split_list(&raw)),
            output_folders: read("OUTPUT_FOLDERS").map(|raw| split_list(&raw)),
            document_capacity: number("DOCUMENT_CACHE_CAPACITY", DEFAULT_DOCUMENT_CAPACITY),
            document_ttl: Duration::from_secs(number("DOCUMENT_TTL_SECS", DEFAULT_DOCUMENT_TTL_SECS)),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.public_base_url, "http://127.0.0.1:8080");
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173".to_string(), "http://localhost:3000".to_string()]
        );
        assert_eq!(config.image_fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.output_folders, None);
        assert_eq!(config.image_max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.image_allowed_hosts, None);
        assert_eq!(config.document_capacity, 100);
        assert_eq!(config.document_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("IMAGE_FETCH_TIMEOUT_SECS", "3"),
            ("OUTPUT_FOLDERS", "folder-a,folder-b"),
            ("IMAGE_MAX_BYTES", "1024"),
            ("IMAGE_ALLOWED_HOSTS", "cdn.example, img.example"),
            ("DOCUMENT_CACHE_CAPACITY", "5"),
            ("DOCUMENT_TTL_SECS", "30"),
        ]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.allowed_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.image_fetch_timeout, Duration::from_secs(3));
        assert_eq!(
            config.output_folders,
            Some(vec!["folder-a".to_string(), "folder-b".to_string()])
        );
        assert_eq!(config.image_max_bytes, 1024);
        assert_eq!(
            config.image_allowed_hosts,
            Some(vec!["cdn.example".to_string(), "img.example".to_string()])
        );
        assert_eq!(config.document_capacity, 5);
        assert_eq!(config.document_ttl, Duration::from_secs(30));
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = config_with(&[("PORT", "eighty"), ("IMAGE_FETCH_TIMEOUT_SECS", "-1")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.image_fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_with(&[("HOST", "  "), ("OUTPUT_FOLDERS", "")]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.output_folders, None);
    }
}
