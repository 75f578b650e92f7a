use std::sync::Arc;

use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcBlockConfig;
use solana_transaction_status::TransactionDetails;
use solana_transaction_status::UiTransactionEncoding;
use tracing::debug;

use crate::Result;
use crate::config::RetryPolicy;
use crate::config::RpcConfig;
use crate::err_with_loc;
use crate::error::ScannerError;
use crate::model::FetchedBlock;
use crate::utils::is_skipped_slot_error;
use crate::utils::with_retry;

#[async_trait]
pub trait BlockFetcher: Send + Sync {
    /// Fetch one slot. A slot without a block is `FetchedBlock::Skipped`.
    async fn fetch_block(
        &self,
        slot: u64,
    ) -> Result<FetchedBlock>;
}

pub struct RpcBlockFetcher {
    client: Arc<RpcClient>,
    retry: RetryPolicy,
}

impl RpcBlockFetcher {
    pub fn new(
        client: Arc<RpcClient>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            retry,
        }
    }

    pub fn from_config(
        rpc_config: &RpcConfig,
        retry: RetryPolicy,
    ) -> Result<Self> {
        Ok(Self::new(Arc::new(rpc_config.make_client()?), retry))
    }

    fn block_config(&self) -> RpcBlockConfig {
        RpcBlockConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            transaction_details: Some(TransactionDetails::Accounts),
            rewards: Some(false),
            commitment: Some(self.client.commitment()),
            max_supported_transaction_version: Some(0),
        }
    }

    async fn get_block(
        &self,
        slot: u64,
    ) -> Result<FetchedBlock> {
        match self.client.get_block_with_config(slot, self.block_config()).await {
            Ok(block) => Ok(FetchedBlock::Block(block.into())),
            Err(e) => {
                let message = e.to_string();
                if is_skipped_slot_error(&message) {
                    debug!("slot_skipped::{}", slot);
                    return Ok(FetchedBlock::Skipped { slot });
                }
                Err(err_with_loc!(ScannerError::UpstreamUnavailable(format!("get_block slot {}: {}", slot, message))))
            },
        }
    }
}

#[async_trait]
impl BlockFetcher for RpcBlockFetcher {
    async fn fetch_block(
        &self,
        slot: u64,
    ) -> Result<FetchedBlock> {
        with_retry(&self.retry, "get_block", || self.get_block(slot)).await
    }
}
