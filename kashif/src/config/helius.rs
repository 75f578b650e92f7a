use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_LIQUIDITY_SOURCE;
use crate::constants::HELIUS_API_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeliusConfig {
    pub api_url: String,
    pub api_key: String,
    // Source filter for the deployer history lookup
    pub liquidity_source: String,
}

impl Default for HeliusConfig {
    fn default() -> Self {
        Self {
            api_url: HELIUS_API_URL.to_string(),
            api_key: String::new(),
            liquidity_source: DEFAULT_LIQUIDITY_SOURCE.to_string(),
        }
    }
}
