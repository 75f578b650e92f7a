use serde::Deserialize;
use serde::Serialize;

use crate::Result;
use crate::err_with_loc;
use crate::error::ScannerError;

/// One row of the token transfer export, kept as exported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintTransactionRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub slot: String,
    pub block_time_unix: String,
    pub block_time: String,
    pub fee: String,
    pub is_inner: String,
    pub tx_hash: String,
    pub source_owner_account: String,
    pub source_token_account: String,
    pub dest_owner_account: String,
    pub dest_token_account: String,
    pub amount: String,
    pub symbol: String,
    pub decimals: String,
    pub token_address: String,
}

impl MintTransactionRecord {
    /// Build a record from the 15 export columns, in export order
    pub fn from_columns(columns: &[&str]) -> Option<Self> {
        let [
            kind,
            slot,
            block_time_unix,
            block_time,
            fee,
            is_inner,
            tx_hash,
            source_owner_account,
            source_token_account,
            dest_owner_account,
            dest_token_account,
            amount,
            symbol,
            decimals,
            token_address,
        ] = columns
        else {
            return None;
        };

        Some(Self {
            kind: kind.to_string(),
            slot: slot.to_string(),
            block_time_unix: block_time_unix.to_string(),
            block_time: block_time.to_string(),
            fee: fee.to_string(),
            is_inner: is_inner.to_string(),
            tx_hash: tx_hash.to_string(),
            source_owner_account: source_owner_account.to_string(),
            source_token_account: source_token_account.to_string(),
            dest_owner_account: dest_owner_account.to_string(),
            dest_token_account: dest_token_account.to_string(),
            amount: amount.to_string(),
            symbol: symbol.to_string(),
            decimals: decimals.to_string(),
            token_address: token_address.to_string(),
        })
    }

    /// A record without deployer or signature cannot seed a scan
    pub fn is_empty(&self) -> bool {
        self.tx_hash.trim().is_empty() || self.source_owner_account.trim().is_empty()
    }

    pub fn deployer(&self) -> &str {
        &self.source_owner_account
    }

    pub fn deployment_signature(&self) -> &str {
        &self.tx_hash
    }

    pub fn slot(&self) -> Result<u64> {
        self.slot.trim().parse::<u64>().map_err(|e| {
            err_with_loc!(ScannerError::Parse(format!("mint slot {:?} for {}: {}", self.slot, self.token_address, e)))
        })
    }
}
