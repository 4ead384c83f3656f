// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::fmt;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Upper bound on a single connection's lifetime, in seconds
    pub timeout_secs: u64,
}

/// What the demo site serves and how
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub content_dir: String,
    pub index_file: String,
    /// Request path suffixes served as static assets from `content_dir`
    pub asset_suffixes: Vec<String>,
    /// Asset cache lifetime; 0 disables caching
    pub cache_seconds: u64,
    pub stats_path: String,
    /// When set, every request is redirected instead of served
    #[serde(default)]
    pub redirect: Option<RedirectMode>,
}

/// Redirect-everything modes
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RedirectMode {
    /// Same URL over HTTPS
    Https,
    /// Same URL over HTTP
    Http,
    /// A fixed target
    To { target: String },
}

impl fmt::Display for RedirectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Https => write!(f, "https"),
            Self::Http => write!(f, "http"),
            Self::To { target } => write!(f, "to {target}"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}
