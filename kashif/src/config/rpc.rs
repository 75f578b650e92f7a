use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;

use crate::Result;
use crate::constants::DEFAULT_RPC_TIMEOUT_MS;
use crate::constants::DEFAULT_RPC_URL;
use crate::err_with_loc;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
    pub commitment: String,
    pub timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            commitment: "confirmed".to_string(),
            timeout_ms: DEFAULT_RPC_TIMEOUT_MS,
        }
    }
}

impl RpcConfig {
    /// `getBlock` only serves confirmed or finalized blocks
    pub fn commitment_config(&self) -> Result<CommitmentConfig> {
        match self.commitment.as_str() {
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            "processed" => Err(err_with_loc!(ConfigError::InvalidValue(
                "rpc commitment processed is not supported by getBlock, use confirmed or finalized".to_string()
            ))),
            other => Err(err_with_loc!(ConfigError::InvalidValue(format!("unknown rpc commitment: {}", other)))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn make_client(&self) -> Result<RpcClient> {
        Ok(RpcClient::new_with_timeout_and_commitment(self.url.clone(), self.timeout(), self.commitment_config()?))
    }
}
