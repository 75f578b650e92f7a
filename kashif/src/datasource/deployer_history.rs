use async_trait::async_trait;
use tracing::debug;

use super::status_error;
use super::transport_error;
use crate::Result;
use crate::config::HeliusConfig;
use crate::config::RetryPolicy;
use crate::err_with_loc;
use crate::error::ScannerError;
use crate::model::DeployerTransaction;
use crate::utils::with_retry;

#[async_trait]
pub trait DeployerHistory: Send + Sync {
    /// Deployer transactions from the newest back to `until_signature`
    async fn transactions_until(
        &self,
        deployer: &str,
        until_signature: &str,
    ) -> Result<Vec<DeployerTransaction>>;
}

/// Helius parsed transaction history for an address
pub struct HeliusHistoryClient {
    client: reqwest::Client,
    config: HeliusConfig,
    retry: RetryPolicy,
}

impl HeliusHistoryClient {
    pub fn new(
        client: reqwest::Client,
        config: HeliusConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            config,
            retry,
        }
    }

    fn transactions_url(
        &self,
        deployer: &str,
    ) -> String {
        format!("{}/addresses/{}/transactions", self.config.api_url.trim_end_matches('/'), deployer)
    }

    async fn fetch(
        &self,
        deployer: &str,
        until_signature: &str,
    ) -> Result<Vec<DeployerTransaction>> {
        let query = [
            ("source", self.config.liquidity_source.as_str()),
            ("until", until_signature),
            ("api-key", self.config.api_key.as_str()),
        ];

        let response = self
            .client
            .get(self.transactions_url(deployer))
            .query(&query)
            .send()
            .await
            .map_err(|e| err_with_loc!(transport_error(&format!("deployer history for {}", deployer), &e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(err_with_loc!(status_error(&format!("deployer history for {}", deployer), status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| err_with_loc!(transport_error(&format!("deployer history body for {}", deployer), &e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| err_with_loc!(ScannerError::Parse(format!("deployer history for {}: {}", deployer, e))))
    }
}

#[async_trait]
impl DeployerHistory for HeliusHistoryClient {
    async fn transactions_until(
        &self,
        deployer: &str,
        until_signature: &str,
    ) -> Result<Vec<DeployerTransaction>> {
        let history = with_retry(&self.retry, "deployer_history", || self.fetch(deployer, until_signature)).await?;
        debug!("deployer_history_fetched::deployer::{}::transactions::{}", deployer, history.len());
        Ok(history)
    }
}
