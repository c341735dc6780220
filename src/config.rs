use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_COHERE_API_URL: &str = "https://api.cohere.ai/v1/summarize";
pub const DEFAULT_ARTICLE_DOMAIN: &str = "cbc.ca";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub cohere_api_key: String,
    pub cohere_api_url: String,
    /// Substring every submitted article URL must contain.
    pub article_domain: String,
    /// Prebuilt front-end served for every non-API path.
    pub static_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests need not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cohere_api_key = lookup("SECRET_COHERE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError(
                    "No Cohere API key found. Set SECRET_COHERE_API_KEY in the environment or in a .env file in the project's root directory".to_string(),
                )
            })?;

        // Load server configuration with defaults
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let server_addr = SocketAddr::new(ip, port);

        Ok(Config {
            server_addr,
            cohere_api_key,
            cohere_api_url: lookup("COHERE_API_URL").unwrap_or_else(|| DEFAULT_COHERE_API_URL.to_string()),
            article_domain: lookup("ARTICLE_DOMAIN").unwrap_or_else(|| DEFAULT_ARTICLE_DOMAIN.to_string()),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("build")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_fails_fast() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "8080")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(msg) if msg.contains("SECRET_COHERE_API_KEY")));
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let err = Config::from_lookup(lookup_from(&[("SECRET_COHERE_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[("SECRET_COHERE_API_KEY", "abc")])).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.cohere_api_key, "abc");
        assert_eq!(config.cohere_api_url, DEFAULT_COHERE_API_URL);
        assert_eq!(config.article_domain, "cbc.ca");
        assert_eq!(config.static_dir, PathBuf::from("build"));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("SECRET_COHERE_API_KEY", "abc"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("ARTICLE_DOMAIN", "example.com"),
            ("STATIC_DIR", "/srv/www"),
            ("COHERE_API_URL", "http://localhost:9000/summarize"),
        ]))
        .unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.article_domain, "example.com");
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.cohere_api_url, "http://localhost:9000/summarize");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("SECRET_COHERE_API_KEY", "abc"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::ConfigError(msg) if msg.starts_with("Invalid port")));
    }
}
