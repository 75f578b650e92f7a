use serde::Deserialize;
use serde::Serialize;

/// Why a scan stopped without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Termination {
    LimitReached,
    EffortExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub token_address: String,
    pub deployer: String,
    pub deployment_signature: String,
    pub start_slot: u64,
    // Last slot fetched, equal to start_slot when nothing was fetched
    pub last_slot: u64,
    pub blocks_fetched: usize,
    pub blocks_skipped: usize,
    pub addresses: Vec<String>,
    pub termination: Termination,
}

impl ScanReport {
    /// Report for a scan that had nothing to do
    pub fn empty(token_address: impl Into<String>) -> Self {
        Self {
            token_address: token_address.into(),
            deployer: String::new(),
            deployment_signature: String::new(),
            start_slot: 0,
            last_slot: 0,
            blocks_fetched: 0,
            blocks_skipped: 0,
            addresses: Vec::new(),
            termination: Termination::LimitReached,
        }
    }
}
