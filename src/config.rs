use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Search page configuration
    #[serde(default)]
    pub search: SearchPageConfig,

    /// Authenticated user resolution
    #[serde(default)]
    pub auth: AuthConfig,

    /// Link generation
    #[serde(default)]
    pub links: LinksConfig,

    /// Store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the embedded defaults, an optional override file and the environment
    pub fn load_from(config_path: &str) -> Result<Self> {
        let config = config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(config_path).required(false))
            // Override with environment variables (prefix: ACTIVITY_)
            .add_source(
                config::Environment::with_prefix("ACTIVITY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Absolute base URL used when building links (tag links, user links)
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// Directory served under `/assets`
    pub assets_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
            public_url: default_public_url(),
            assets_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Serve the activity search pages at all
    #[serde(default = "default_true")]
    pub search_page: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self { search_page: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPageConfig {
    /// Annotations per page when the request carries no usable `page_size`
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Number of tag buckets in the tag aggregation
    #[serde(default = "default_aggregation_limit")]
    pub tag_aggregation_limit: usize,

    /// Number of user buckets in the user aggregation
    #[serde(default = "default_aggregation_limit")]
    pub user_aggregation_limit: usize,
}

impl Default for SearchPageConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            tag_aggregation_limit: default_aggregation_limit(),
            user_aggregation_limit: default_aggregation_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Trusted header carrying the authenticated userid
    #[serde(default = "default_user_header")]
    pub user_header: String,

    /// Authority (domain) of local accounts
    #[serde(default = "default_authority")]
    pub authority: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            authority: default_authority(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinksConfig {
    /// Base URL of the in-context link service; direct `#annotations:` links when unset
    pub bouncer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// JSON file with users, groups and annotations loaded at startup
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            service_name: default_service_name(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_page_size() -> usize {
    200
}

fn default_aggregation_limit() -> usize {
    50
}

fn default_user_header() -> String {
    "x-authenticated-userid".to_string()
}

fn default_authority() -> String {
    "localhost".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "annotation-activity".to_string()
}

fn default_true() -> bool {
    true
}
