pub mod block_fetcher;
pub mod deployer_history;
pub mod mint_locator;

pub use block_fetcher::BlockFetcher;
pub use block_fetcher::RpcBlockFetcher;
pub use deployer_history::DeployerHistory;
pub use deployer_history::HeliusHistoryClient;
pub use mint_locator::MintLocator;
pub use mint_locator::SolscanMintLocator;

use std::time::Duration;

use crate::Result;
use crate::err_with_loc;
use crate::error::ScannerError;

/// Shared HTTP client for the export and history APIs
pub fn make_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| err_with_loc!(ScannerError::UpstreamUnavailable(format!("http client: {}", e))))
}

// Keeps the failure class in the message so retry classification can see it
fn transport_error(
    context: &str,
    e: &reqwest::Error,
) -> ScannerError {
    let kind = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    ScannerError::UpstreamUnavailable(format!("{}: {}: {}", context, kind, e))
}

fn status_error(
    context: &str,
    status: reqwest::StatusCode,
) -> ScannerError {
    ScannerError::UpstreamUnavailable(format!("{}: received non-2xx status code: {}", context, status))
}
