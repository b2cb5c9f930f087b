use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::history::HistoryConfig;
use super::ledger::LedgerConfig;
use super::logging::LoggingConfig;
use super::resolution::{ResolutionConfig, ResolutionMode};
use super::server::ServerConfig;
use super::sync::SyncConfig;

const LOCAL_CONFIG_PATH: &str = "ledger-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ledger-dns/config.toml";

/// Main configuration structure for Ledger DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// DNS listener (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Ledger JSON-RPC endpoint
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Issuance history read API used by live resolution
    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub resolution: ResolutionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ledger-dns.toml in current directory
    /// 3. /etc/ledger-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(url) = overrides.rpc_url {
            self.ledger.rpc_url = url;
        }
        if let Some(mode) = overrides.resolution_mode {
            self.resolution.mode = mode;
        }
        if overrides.no_sync {
            self.sync.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.sync.enabled && self.ledger.rpc_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Ledger RPC URL is required when sync is enabled".to_string(),
            ));
        }

        if self.ledger.activation_height == 0 {
            return Err(ConfigError::Validation(
                "Activation height must be at least 1".to_string(),
            ));
        }

        if self.resolution.mode == ResolutionMode::Live {
            if self.history.base_url.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "History API URL is required in live resolution mode".to_string(),
                ));
            }
            if self.history.max_pages == 0 {
                return Err(ConfigError::Validation(
                    "history.max_pages must be at least 1".to_string(),
                ));
            }
        }

        if self.resolution.record_ttl == 0 {
            return Err(ConfigError::Validation(
                "Record TTL cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
    pub rpc_url: Option<String>,
    pub resolution_mode: Option<ResolutionMode>,
    pub no_sync: bool,
}
