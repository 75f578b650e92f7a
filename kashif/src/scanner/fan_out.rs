use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::TokenScanner;
use crate::model::FirstBuyerResult;
use crate::model::WalletOccurrence;

/// Runs one token scan per task and cross-references the buyers
pub struct FanOutAggregator {
    scanner: Arc<TokenScanner>,
    // None spawns every scan at once
    max_concurrent_scans: Option<usize>,
}

impl FanOutAggregator {
    pub fn new(
        scanner: Arc<TokenScanner>,
        max_concurrent_scans: Option<usize>,
    ) -> Self {
        Self {
            scanner,
            max_concurrent_scans,
        }
    }

    /// Every wallet found among the first `limit` buyers of any token, with
    /// the tokens it bought. A failed scan contributes no wallets.
    pub async fn common_buyers(
        &self,
        token_addresses: &[String],
        limit: usize,
    ) -> Vec<WalletOccurrence> {
        let tokens = dedup_tokens(token_addresses);
        if tokens.is_empty() {
            return Vec::new();
        }

        info!("fan_out_started::tokens::{}::limit::{}", tokens.len(), limit);
        let (sender, mut receiver) = mpsc::channel::<FirstBuyerResult>(tokens.len());
        let semaphore = self.max_concurrent_scans.map(|permits| Arc::new(Semaphore::new(permits.max(1))));
        let mut tasks = JoinSet::new();

        for token_address in tokens {
            let scanner = self.scanner.clone();
            let sender = sender.clone();
            let semaphore = semaphore.clone();

            tasks.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let result = match scanner.scan(&token_address, limit).await {
                    Ok(addresses) => FirstBuyerResult::new(token_address.clone(), addresses),
                    Err(e) => {
                        error!("token_scan_failed::token::{}::error::{:#}", token_address, e);
                        FirstBuyerResult::empty(token_address.clone())
                    },
                };

                if sender.send(result).await.is_err() {
                    warn!("fan_out_receiver_closed::token::{}", token_address);
                }
            });
        }
        drop(sender);

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("token_scan_task_panicked::error::{}", e);
            }
        }

        let mut results = Vec::new();
        while let Some(result) = receiver.recv().await {
            debug!("token_scan_collected::token::{}::found::{}", result.token_address, result.addresses.len());
            results.push(result);
        }

        let occurrences = merge_occurrences(results);
        info!(
            "fan_out_finished::wallets::{}::common::{}",
            occurrences.len(),
            occurrences.iter().filter(|occurrence| occurrence.is_common()).count()
        );
        occurrences
    }
}

fn dedup_tokens(token_addresses: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::with_capacity(token_addresses.len());
    for token_address in token_addresses {
        if seen.insert(token_address.as_str()) {
            tokens.push(token_address.clone());
        }
    }
    tokens
}

/// Merge per-token buyers into one entry per wallet, most shared first
pub fn merge_occurrences<I>(results: I) -> Vec<WalletOccurrence>
where
    I: IntoIterator<Item = FirstBuyerResult>,
{
    let mut by_address: HashMap<String, WalletOccurrence> = HashMap::new();
    for result in results {
        for address in result.addresses {
            let occurrence =
                by_address.entry(address.clone()).or_insert_with(|| WalletOccurrence::new(address));
            if !occurrence.occurrences.contains(&result.token_address) {
                occurrence.record(&result.token_address);
            }
        }
    }

    let mut occurrences: Vec<WalletOccurrence> = by_address.into_values().collect();
    occurrences.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.address.cmp(&b.address)));
    occurrences
}
