// Configuration module entry point
// Loads layered configuration: file, environment, coded defaults

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{AssetsConfig, Config, LoggingConfig, Mode, ServerConfig};

impl Config {
    /// Load configuration from the default `config.toml` location
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Environment variables with the `PORTFOLIO_` prefix override file
    /// values, e.g. `PORTFOLIO_SERVER__PORT=8080` or
    /// `PORTFOLIO_SERVER__MODE=production`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("PORTFOLIO")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5002)?
            .set_default("server.mode", "development")?
            .set_default("server.serverless", false)?
            .set_default("assets.dist_dir", "dist/public")?
            .set_default("assets.index_file", "index.html")?
            .set_default("logging.access_log", true)?
            .set_default("logging.source", "portfolio")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    pub const fn is_production(&self) -> bool {
        matches!(self.server.mode, Mode::Production)
    }
}
