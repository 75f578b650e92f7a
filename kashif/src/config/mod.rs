pub mod helius;
pub mod log;
pub mod rpc;
pub mod scanner;
pub mod solscan;

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

pub use helius::HeliusConfig;
pub use log::LoggingConfig;
pub use rpc::RpcConfig;
pub use scanner::RetryPolicy;
pub use scanner::ScannerConfig;
pub use solscan::SolscanConfig;

use crate::Result;
use crate::err_with_loc;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc: RpcConfig,
    pub solscan: SolscanConfig,
    pub helius: HeliusConfig,
    pub scanner: ScannerConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Environment variables take precedence over the file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("RPC_URL") {
            debug!("config_override::RPC_URL");
            self.rpc.url = url;
        }
        if let Ok(api_key) = std::env::var("HELIUS_API_KEY") {
            debug!("config_override::HELIUS_API_KEY");
            self.helius.api_key = api_key;
        }
        if let Ok(export_url) = std::env::var("SOLSCAN_EXPORT_URL") {
            debug!("config_override::SOLSCAN_EXPORT_URL");
            self.solscan.export_url = export_url;
        }
        if let Ok(api_key) = std::env::var("SOLSCAN_API_KEY") {
            debug!("config_override::SOLSCAN_API_KEY");
            self.solscan.api_key = Some(api_key);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rpc.url.trim().is_empty() {
            return Err(err_with_loc!(ConfigError::InvalidValue("rpc.url is empty".to_string())));
        }
        self.rpc.commitment_config()?;
        if self.scanner.stagnation_ceiling == 0 {
            return Err(err_with_loc!(ConfigError::InvalidValue(
                "scanner.stagnation_ceiling must be greater than zero".to_string()
            )));
        }
        if self.scanner.http_timeout_ms == 0 || self.rpc.timeout_ms == 0 {
            return Err(err_with_loc!(ConfigError::InvalidValue("timeouts must be greater than zero".to_string())));
        }
        if self.helius.api_key.trim().is_empty() {
            return Err(err_with_loc!(ConfigError::InvalidValue(
                "helius.api_key is empty, set it in the config file or HELIUS_API_KEY".to_string()
            )));
        }
        Ok(())
    }
}

pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| err_with_loc!(ConfigError::ParseError(e.to_string())))?;
    Ok(config)
}

/// Load the config file, fall back to defaults when it is missing, then apply
/// `.env` and environment overrides.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let mut config = if path.exists() {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| err_with_loc!(ConfigError::OpenFileError(format!("{}: {}", path.display(), e))))?;
        parse_config(&config_str)?
    } else {
        debug!("config_file_missing::using_defaults::{}", path.display());
        Config::default()
    };

    dotenvy::dotenv().ok();
    config.apply_env_overrides();
    config.validate()?;

    Ok(config)
}
