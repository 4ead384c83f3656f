// Configuration module entry point
// Layers defaults, an optional config file and SITE_* environment variables

mod types;

use std::net::SocketAddr;
use std::time::Duration;

use crate::http::ONE_YEAR;

pub use types::{Config, LoggingConfig, RedirectMode, ServerConfig, SiteConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from the given file path (extension optional)
    ///
    /// A missing file is not an error; defaults and environment apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::build(
            config::File::with_name(config_path).required(false),
            environment(),
        )
    }

    /// Load configuration from TOML text, over the same defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        Self::build(
            config::File::from_str(toml, config::FileFormat::Toml),
            environment(),
        )
    }

    fn build<S>(file: S, env: config::Environment) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.timeout_secs", 30)?
            .set_default("site.content_dir", "content")?
            .set_default("site.index_file", "index.html")?
            .set_default(
                "site.asset_suffixes",
                vec![".css", ".js", ".png", ".jpg", ".gif", ".svg", ".ico"],
            )?
            .set_default("site.cache_seconds", ONE_YEAR.as_secs())?
            .set_default("site.stats_path", "/stats")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .add_source(file)
            .add_source(env)
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// How long assets may be cached, or `None` for no caching
    pub const fn cache_duration(&self) -> Option<Duration> {
        match self.site.cache_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    /// Path of the index page inside the content directory
    pub fn index_path(&self) -> String {
        format!(
            "{}/{}",
            self.site.content_dir.trim_end_matches('/'),
            self.site.index_file
        )
    }
}

/// `SITE_SERVER__PORT=9090` overrides `server.port`
fn environment() -> config::Environment {
    config::Environment::with_prefix("SITE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
