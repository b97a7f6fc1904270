//! API Configuration
//!
//! Holds the backend origin, the symbolic endpoint path table, the request
//! timeout and the default header set, and builds full URLs and per-request
//! headers from them. Configuration is immutable once built; overrides come
//! from the environment, a builder, or a TOML file.

use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use thiserror::Error;

/// Default backend origin
const DEFAULT_BASE_URL: &str = "http://165.22.208.62:5000";

/// Demo API key, overridable via `HGM_API_KEY`
const DEFAULT_API_KEY: &str = "demo-hgm-api-key-2024-raipur";

/// Request timeout in milliseconds
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Symbolic endpoint names mapped to URL path templates.
///
/// Templates may contain `:name` placeholders that are substituted by
/// [`ApiConfig::resolve_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    // Authentication
    Login,
    Register,
    Logout,
    RefreshToken,

    // User details
    UserDetails,
    Root,

    // Dashboard
    DashboardStats,
    RecentActivities,

    // Plant management
    Plants,
    PlantById,
    PlantDistribution,
    PlantPhotos,

    // Family management
    Families,
    FamilyById,
    FamilyMembers,

    // Anganwadi centers
    Anganwadi,
    AnganwadiById,
    AnganwadiFamilies,

    // Analytics
    Analytics,
    Reports,
    ExportData,

    // File upload
    UploadPhoto,
    UploadDocument,
}

impl Endpoint {
    /// URL path template for this endpoint
    pub const fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => "/login",
            Endpoint::Register => "/register",
            Endpoint::Logout => "/logout",
            Endpoint::RefreshToken => "/auth/refresh",
            Endpoint::UserDetails => "/details",
            Endpoint::Root => "/",
            Endpoint::DashboardStats => "/dashboard/stats",
            Endpoint::RecentActivities => "/dashboard/activities",
            Endpoint::Plants => "/plants",
            Endpoint::PlantById => "/plants/:id",
            Endpoint::PlantDistribution => "/plants/distribution",
            Endpoint::PlantPhotos => "/plants/:id/photos",
            Endpoint::Families => "/families",
            Endpoint::FamilyById => "/families/:id",
            Endpoint::FamilyMembers => "/families/:id/members",
            Endpoint::Anganwadi => "/anganwadi",
            Endpoint::AnganwadiById => "/anganwadi/:id",
            Endpoint::AnganwadiFamilies => "/anganwadi/:id/families",
            Endpoint::Analytics => "/analytics",
            Endpoint::Reports => "/reports",
            Endpoint::ExportData => "/export",
            Endpoint::UploadPhoto => "/upload/photo",
            Endpoint::UploadDocument => "/upload/document",
        }
    }
}

/// Backend access configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let base_url =
            std::env::var("HGM_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("HGM_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());
        Self {
            base_url,
            api_key,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    /// Create a configuration from defaults and environment overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ApiConfigBuilder
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Load configuration from a TOML file, falling back to defaults for
    /// any value the file does not set.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Read(e.to_string()))?;
        let file: ConfigFile =
            toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut builder = Self::builder();
        if let Some(base_url) = file.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(api_key) = file.api_key {
            builder = builder.api_key(api_key);
        }
        if let Some(timeout_ms) = file.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        builder.build()
    }

    /// Backend origin
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Static API key sent on every request
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Per-request cancellation timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve an endpoint into a full URL, substituting each `:name`
    /// placeholder with the matching value from `params`.
    ///
    /// Placeholders without a matching key are left verbatim; it is the
    /// caller's responsibility to supply every parameter the template
    /// declares.
    pub fn resolve_url(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> String {
        let mut path = endpoint.path().to_string();
        for (key, value) in params {
            path = path.replace(&format!(":{}", key), value);
        }
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Default header set: content type, accept and API version.
    pub fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("X-API-Version", HeaderValue::from_static("1.0"));
        headers
    }

    /// Default headers plus the API key and, when a token is available,
    /// the bearer authorization header.
    pub fn auth_headers(&self, token: Option<&str>) -> HeaderMap {
        let mut headers = self.default_headers();
        if let Ok(key) = HeaderValue::from_str(&self.api_key) {
            headers.insert("X-API-Key", key);
        }
        if let Some(token) = token {
            if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, bearer);
            }
        }
        headers
    }
}

/// Builder for ApiConfig
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl ApiConfigBuilder {
    /// Set the backend origin
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let defaults = ApiConfig::default();
        let base_url = self.base_url.unwrap_or(defaults.base_url);
        if base_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("base_url"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(base_url));
        }
        Ok(ApiConfig {
            base_url,
            api_key: self.api_key.unwrap_or(defaults.api_key),
            timeout: self.timeout.unwrap_or(defaults.timeout),
        })
    }
}

/// Schema of the optional TOML configuration file
#[derive(Debug, Deserialize)]
struct ConfigFile {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout_ms: Option<u64>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("could not read config file: {0}")]
    Read(String),
    #[error("could not parse config file: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_config() -> ApiConfig {
        ApiConfig::builder()
            .base_url("http://localhost:5000")
            .api_key("test-key")
            .build()
            .expect("valid test config")
    }

    #[test]
    fn test_resolve_url_plain() {
        let config = test_config();
        assert_eq!(
            config.resolve_url(Endpoint::Login, &[]),
            "http://localhost:5000/login"
        );
    }

    #[test]
    fn test_resolve_url_with_params() {
        let config = test_config();
        assert_eq!(
            config.resolve_url(Endpoint::PlantById, &[("id", "42")]),
            "http://localhost:5000/plants/42"
        );
        assert_eq!(
            config.resolve_url(Endpoint::FamilyMembers, &[("id", "FAM001")]),
            "http://localhost:5000/families/FAM001/members"
        );
    }

    #[test]
    fn test_resolve_url_missing_param_left_verbatim() {
        let config = test_config();
        assert_eq!(
            config.resolve_url(Endpoint::AnganwadiById, &[]),
            "http://localhost:5000/anganwadi/:id"
        );
    }

    #[test]
    fn test_resolve_url_trims_trailing_slash() {
        let config = ApiConfig::builder()
            .base_url("http://localhost:5000/")
            .build()
            .expect("valid config");
        assert_eq!(
            config.resolve_url(Endpoint::Plants, &[]),
            "http://localhost:5000/plants"
        );
    }

    #[test]
    fn test_default_headers() {
        let config = test_config();
        let headers = config.default_headers();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(headers.get("X-API-Version").unwrap(), "1.0");
    }

    #[test]
    fn test_auth_headers_without_token() {
        let config = test_config();
        let headers = config.auth_headers(None);
        assert_eq!(headers.get("X-API-Key").unwrap(), "test-key");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_auth_headers_with_token() {
        let config = test_config();
        let headers = config.auth_headers(Some("abc123"));
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        assert!(ApiConfig::builder().base_url("localhost:5000").build().is_err());
        assert!(ApiConfig::builder().base_url("   ").build().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hgm.toml");
        std::fs::write(
            &path,
            "base_url = \"http://127.0.0.1:9000\"\ntimeout_ms = 500\n",
        )
        .expect("write config");

        let config = ApiConfig::from_file(&path).expect("load config");
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.timeout(), Duration::from_millis(500));
    }

    proptest! {
        // Every placeholder with a supplied param is substituted; the rest
        // of the template survives untouched.
        #[test]
        fn prop_resolve_substitutes_supplied_placeholders(id in "[A-Za-z0-9]{1,12}") {
            let config = test_config();
            let url = config.resolve_url(Endpoint::PlantPhotos, &[("id", &id)]);
            prop_assert_eq!(url, format!("http://localhost:5000/plants/{}/photos", id));
        }

        #[test]
        fn prop_resolve_ignores_unrelated_params(key in "[a-z]{1,8}", value in "[A-Za-z0-9]{1,8}") {
            prop_assume!(key != "id");
            let config = test_config();
            let url = config.resolve_url(Endpoint::FamilyById, &[(&key, &value)]);
            prop_assert_eq!(url, "http://localhost:5000/families/:id".to_string());
        }
    }
}
