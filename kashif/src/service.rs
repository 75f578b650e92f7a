use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::Result;
use crate::config::Config;
use crate::datasource::HeliusHistoryClient;
use crate::datasource::RpcBlockFetcher;
use crate::datasource::SolscanMintLocator;
use crate::datasource::make_http_client;
use crate::model::ScanReport;
use crate::model::WalletOccurrence;
use crate::scanner::FanOutAggregator;
use crate::scanner::TokenScanner;

/// Entry point for first-buyer lookups over one or many tokens
pub struct FirstBuyerService {
    scanner: Arc<TokenScanner>,
    aggregator: FanOutAggregator,
}

impl FirstBuyerService {
    pub fn new(
        scanner: Arc<TokenScanner>,
        max_concurrent_scans: Option<usize>,
    ) -> Self {
        let aggregator = FanOutAggregator::new(scanner.clone(), max_concurrent_scans);
        Self {
            scanner,
            aggregator,
        }
    }

    /// Wire the HTTP and RPC collaborators described by `config`
    pub fn from_config(
        config: &Config,
        cancellation_token: CancellationToken,
    ) -> Result<Self> {
        let http_client = make_http_client(config.scanner.http_timeout())?;
        let retry = config.scanner.retry.clone();

        let mint_locator =
            Arc::new(SolscanMintLocator::new(http_client.clone(), config.solscan.clone(), retry.clone()));
        let deployer_history = Arc::new(HeliusHistoryClient::new(http_client, config.helius.clone(), retry.clone()));
        let block_fetcher = Arc::new(RpcBlockFetcher::from_config(&config.rpc, retry)?);
        info!("service_ready::rpc::{}::export::{}", config.rpc.url, config.solscan.export_url);

        let scanner = TokenScanner::new(mint_locator, deployer_history, block_fetcher, config.scanner.clone())
            .with_cancellation_token(cancellation_token);

        Ok(Self::new(Arc::new(scanner), config.scanner.max_concurrent_scans))
    }

    pub async fn get_first_buyers_of_token(
        &self,
        token_address: &str,
        limit: usize,
    ) -> Result<Vec<String>> {
        self.scanner.scan(token_address, limit).await
    }

    pub async fn first_buyers_report(
        &self,
        token_address: &str,
        limit: usize,
    ) -> Result<ScanReport> {
        self.scanner.scan_with_report(token_address, limit).await
    }

    /// Cross-reference the first buyers of several tokens. Never fails
    /// because of a single token.
    pub async fn find_common_addresses_in_tokens(
        &self,
        limit: usize,
        token_addresses: &[String],
    ) -> Result<Vec<WalletOccurrence>> {
        Ok(self.aggregator.common_buyers(token_addresses, limit).await)
    }
}
