// Configuration types module
// Defines all configuration-related data structures

use std::fmt;

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Execution mode, decided once at startup
    pub mode: Mode,
    /// Restricted hosting context: no live bundler, CORS adapter in front
    pub serverless: bool,
}

/// Execution mode flag
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Static asset store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Directory of pre-built client files
    pub dist_dir: String,
    /// Root document served for unmatched client-side routes
    pub index_file: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Source tag in access-log lines
    pub source: String,
}
