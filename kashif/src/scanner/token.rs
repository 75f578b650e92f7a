use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use solana_pubkey::Pubkey;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::AddressSet;
use crate::Result;
use crate::config::ScannerConfig;
use crate::datasource::BlockFetcher;
use crate::datasource::DeployerHistory;
use crate::datasource::MintLocator;
use crate::err_with_loc;
use crate::error::ScannerError;
use crate::model::FetchedBlock;
use crate::model::MintTransactionRecord;
use crate::model::ScanReport;
use crate::model::Termination;
use crate::model::history::first_trading_slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    LocatingMint,
    ResolvingDeploymentBlock,
    Scanning,
    Done,
    Failed,
}

impl fmt::Display for ScanState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            ScanState::LocatingMint => "locating_mint",
            ScanState::ResolvingDeploymentBlock => "resolving_deployment_block",
            ScanState::Scanning => "scanning",
            ScanState::Done => "done",
            ScanState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Walks the ledger forward from a token's first trading slot and collects
/// the signers of the transactions that touch it.
pub struct TokenScanner {
    mint_locator: Arc<dyn MintLocator>,
    deployer_history: Arc<dyn DeployerHistory>,
    block_fetcher: Arc<dyn BlockFetcher>,
    config: ScannerConfig,
    cancellation_token: CancellationToken,
}

impl TokenScanner {
    pub fn new(
        mint_locator: Arc<dyn MintLocator>,
        deployer_history: Arc<dyn DeployerHistory>,
        block_fetcher: Arc<dyn BlockFetcher>,
        config: ScannerConfig,
    ) -> Self {
        Self {
            mint_locator,
            deployer_history,
            block_fetcher,
            config,
            cancellation_token: CancellationToken::new(),
        }
    }

    pub fn with_cancellation_token(
        mut self,
        cancellation_token: CancellationToken,
    ) -> Self {
        self.cancellation_token = cancellation_token;
        self
    }

    /// First buyers of `token_address`, at most `limit` of them
    pub async fn scan(
        &self,
        token_address: &str,
        limit: usize,
    ) -> Result<Vec<String>> {
        Ok(self.scan_with_report(token_address, limit).await?.addresses)
    }

    pub async fn scan_with_report(
        &self,
        token_address: &str,
        limit: usize,
    ) -> Result<ScanReport> {
        if limit == 0 {
            debug!("scan_skipped::zero_limit::token::{}", token_address);
            return Ok(ScanReport::empty(token_address));
        }
        validate_token_address(token_address)?;

        info!("scan_started::token::{}::limit::{}", token_address, limit);
        let result = self.run_scan(token_address, limit).await;
        match &result {
            Ok(report) => info!(
                "scan_finished::token::{}::found::{}::termination::{:?}::slots::{}..{}::fetched::{}::skipped::{}",
                token_address,
                report.addresses.len(),
                report.termination,
                report.start_slot,
                report.last_slot,
                report.blocks_fetched,
                report.blocks_skipped
            ),
            Err(e) => {
                self.transition(token_address, ScanState::Failed);
                error!("scan_failed::token::{}::error::{:#}", token_address, e);
            },
        }
        result
    }

    async fn run_scan(
        &self,
        token_address: &str,
        limit: usize,
    ) -> Result<ScanReport> {
        self.transition(token_address, ScanState::LocatingMint);
        let record = self.cancellable(token_address, self.mint_locator.locate_mint(token_address)).await?;

        self.transition(token_address, ScanState::ResolvingDeploymentBlock);
        let start_slot = self.cancellable(token_address, self.resolve_start_slot(token_address, &record)).await?;

        self.transition(token_address, ScanState::Scanning);
        let addresses = AddressSet::new(limit);
        let stagnation_ceiling = self.config.stagnation_ceiling;
        let mut slot = start_slot;
        let mut last_slot = start_slot;
        let mut blocks_fetched = 0;
        let mut blocks_skipped = 0;
        let mut stagnation = 0;

        let termination = loop {
            if addresses.is_full().await {
                break Termination::LimitReached;
            }
            if stagnation > stagnation_ceiling {
                warn!(
                    "scan_effort_exhausted::token::{}::slot::{}::found::{}",
                    token_address,
                    slot,
                    addresses.len().await
                );
                break Termination::EffortExhausted;
            }

            let fetched = self.cancellable(token_address, self.block_fetcher.fetch_block(slot)).await?;
            blocks_fetched += 1;
            last_slot = slot;

            let added = match fetched {
                FetchedBlock::Block(block) => addresses.add_from_block(&block, token_address).await,
                FetchedBlock::Skipped { .. } => {
                    blocks_skipped += 1;
                    0
                },
            };

            if added > 0 {
                stagnation = 0;
                debug!("block_productive::token::{}::slot::{}::added::{}", token_address, slot, added);
            } else {
                stagnation += 1;
            }

            slot = slot.saturating_add(1);
        };

        self.transition(token_address, ScanState::Done);
        Ok(ScanReport {
            token_address: token_address.to_string(),
            deployer: record.deployer().to_string(),
            deployment_signature: record.deployment_signature().to_string(),
            start_slot,
            last_slot,
            blocks_fetched,
            blocks_skipped,
            addresses: addresses.into_addresses(),
            termination,
        })
    }

    async fn resolve_start_slot(
        &self,
        token_address: &str,
        record: &MintTransactionRecord,
    ) -> Result<u64> {
        let history =
            self.deployer_history.transactions_until(record.deployer(), record.deployment_signature()).await?;

        match first_trading_slot(&history) {
            Some(slot) => {
                debug!("deployment_block_resolved::token::{}::slot::{}", token_address, slot);
                Ok(slot)
            },
            None => {
                warn!("no_pool_event::token::{}::falling_back_to_mint_slot::{}", token_address, record.slot);
                record.slot()
            },
        }
    }

    async fn cancellable<T, F>(
        &self,
        token_address: &str,
        operation: F,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancellation_token.cancelled() => {
                Err(err_with_loc!(ScannerError::Cancelled(token_address.to_string())))
            }
            result = operation => result,
        }
    }

    fn transition(
        &self,
        token_address: &str,
        state: ScanState,
    ) {
        debug!("scan_state::token::{}::{}", token_address, state);
    }
}

pub fn validate_token_address(token_address: &str) -> Result<Pubkey> {
    Pubkey::from_str(token_address)
        .map_err(|e| err_with_loc!(ScannerError::InvalidAddress(format!("{}: {}", token_address, e))))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::scanner_error;
    use crate::test_utils::fixtures::TestFixtures;
    use crate::test_utils::mocks::MockBlockFetcher;
    use crate::test_utils::mocks::MockDeployerHistory;
    use crate::test_utils::mocks::MockMintLocator;

    const START_SLOT: u64 = 1_000;

    fn scanner_config(stagnation_ceiling: usize) -> ScannerConfig {
        ScannerConfig {
            stagnation_ceiling,
            ..ScannerConfig::default()
        }
    }

    fn located(token: &str) -> MockMintLocator {
        let mut mint_locator = MockMintLocator::new();
        let record = TestFixtures::mint_record(token, START_SLOT);
        mint_locator.expect_locate_mint().returning(move |_| Ok(record.clone()));
        mint_locator
    }

    fn history_starting_at(slot: u64) -> MockDeployerHistory {
        let mut history = MockDeployerHistory::new();
        history
            .expect_transactions_until()
            .returning(move |_, _| Ok(vec![TestFixtures::deployer_transaction("CREATE_POOL", slot)]));
        history
    }

    fn scanner(
        mint_locator: MockMintLocator,
        history: MockDeployerHistory,
        block_fetcher: MockBlockFetcher,
        stagnation_ceiling: usize,
    ) -> TokenScanner {
        TokenScanner::new(
            Arc::new(mint_locator),
            Arc::new(history),
            Arc::new(block_fetcher),
            scanner_config(stagnation_ceiling),
        )
    }

    #[tokio::test]
    async fn stops_at_limit_without_fetching_further() {
        let token = TestFixtures::token_address();
        let mut block_fetcher = MockBlockFetcher::new();
        for (offset, buyer) in ["A", "B"].into_iter().enumerate() {
            let block = TestFixtures::block_with_buyers(&token, &[buyer]);
            block_fetcher
                .expect_fetch_block()
                .with(eq(START_SLOT + offset as u64))
                .times(1)
                .returning(move |_| Ok(FetchedBlock::Block(block.clone())));
        }
        // S+2 holds C but must never be requested
        block_fetcher.expect_fetch_block().with(eq(START_SLOT + 2)).never();

        let scanner = scanner(located(&token), history_starting_at(START_SLOT), block_fetcher, 100);
        let report = scanner.scan_with_report(&token, 2).await.unwrap();

        assert_eq!(report.addresses, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(report.termination, Termination::LimitReached);
        assert_eq!(report.blocks_fetched, 2);
        assert_eq!(report.last_slot, START_SLOT + 1);
    }

    #[tokio::test]
    async fn empty_blocks_exhaust_effort_after_ceiling() {
        let token = TestFixtures::token_address();
        let mut block_fetcher = MockBlockFetcher::new();
        block_fetcher
            .expect_fetch_block()
            .times(101)
            .returning(|_| Ok(FetchedBlock::Block(TestFixtures::empty_block())));

        let scanner = scanner(located(&token), history_starting_at(START_SLOT), block_fetcher, 100);
        let report = scanner.scan_with_report(&token, 5).await.unwrap();

        assert!(report.addresses.is_empty());
        assert_eq!(report.termination, Termination::EffortExhausted);
        assert_eq!(report.blocks_fetched, 101);
        assert_eq!(report.last_slot, START_SLOT + 100);
    }

    #[tokio::test]
    async fn skipped_blocks_count_towards_stagnation() {
        let token = TestFixtures::token_address();
        let mut block_fetcher = MockBlockFetcher::new();
        block_fetcher.expect_fetch_block().times(4).returning(|slot| Ok(FetchedBlock::Skipped { slot }));

        let scanner = scanner(located(&token), history_starting_at(START_SLOT), block_fetcher, 3);
        let report = scanner.scan_with_report(&token, 5).await.unwrap();

        assert_eq!(report.blocks_skipped, 4);
        assert_eq!(report.termination, Termination::EffortExhausted);
    }

    #[tokio::test]
    async fn productive_block_resets_stagnation() {
        let token = TestFixtures::token_address();
        let slots = Arc::new(Mutex::new(Vec::new()));
        let seen = slots.clone();
        let buyer_block = TestFixtures::block_with_buyers(&token, &["A"]);
        let mut block_fetcher = MockBlockFetcher::new();
        block_fetcher.expect_fetch_block().returning(move |slot| {
            seen.lock().unwrap().push(slot);
            // Two empty slots, then the buyer, then nothing
            if slot == START_SLOT + 2 {
                Ok(FetchedBlock::Block(buyer_block.clone()))
            } else {
                Ok(FetchedBlock::Block(TestFixtures::empty_block()))
            }
        });

        let scanner = scanner(located(&token), history_starting_at(START_SLOT), block_fetcher, 2);
        let addresses = scanner.scan(&token, 5).await.unwrap();

        assert_eq!(addresses, vec!["A".to_string()]);
        let slots = slots.lock().unwrap();
        assert_eq!(slots.len(), 6);
        assert!(slots.windows(2).all(|pair| pair[1] == pair[0] + 1));
    }

    #[tokio::test]
    async fn signerless_transactions_add_nothing() {
        let token = TestFixtures::token_address();
        let mut block_fetcher = MockBlockFetcher::new();
        let block = TestFixtures::block_without_signers(&token);
        block_fetcher.expect_fetch_block().returning(move |_| Ok(FetchedBlock::Block(block.clone())));

        let scanner = scanner(located(&token), history_starting_at(START_SLOT), block_fetcher, 1);
        let addresses = scanner.scan(&token, 3).await.unwrap();
        assert!(addresses.is_empty());
    }

    #[tokio::test]
    async fn zero_limit_makes_no_calls() {
        let mut mint_locator = MockMintLocator::new();
        mint_locator.expect_locate_mint().never();
        let scanner = scanner(mint_locator, MockDeployerHistory::new(), MockBlockFetcher::new(), 100);

        let addresses = scanner.scan("not-even-a-key", 0).await.unwrap();
        assert!(addresses.is_empty());
    }

    #[tokio::test]
    async fn invalid_address_is_rejected() {
        let mut mint_locator = MockMintLocator::new();
        mint_locator.expect_locate_mint().never();
        let scanner = scanner(mint_locator, MockDeployerHistory::new(), MockBlockFetcher::new(), 100);

        let error = scanner.scan("0OIl", 3).await.unwrap_err();
        assert!(matches!(scanner_error(&error), Some(ScannerError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn falls_back_to_mint_slot_without_pool_event() {
        let token = TestFixtures::token_address();
        let mut history = MockDeployerHistory::new();
        history
            .expect_transactions_until()
            .with(eq("Deployer111".to_string()), eq("deploysig".to_string()))
            .returning(|_, _| Ok(vec![TestFixtures::deployer_transaction("SWAP", 5)]));

        let mut block_fetcher = MockBlockFetcher::new();
        let block = TestFixtures::block_with_buyers(&token, &["A"]);
        block_fetcher
            .expect_fetch_block()
            .with(eq(START_SLOT))
            .times(1)
            .returning(move |_| Ok(FetchedBlock::Block(block.clone())));

        let scanner = scanner(located(&token), history, block_fetcher, 100);
        let report = scanner.scan_with_report(&token, 1).await.unwrap();
        assert_eq!(report.start_slot, START_SLOT);
        assert_eq!(report.addresses, vec!["A".to_string()]);
    }

    #[tokio::test]
    async fn fetch_failure_is_fatal() {
        let token = TestFixtures::token_address();
        let mut block_fetcher = MockBlockFetcher::new();
        block_fetcher.expect_fetch_block().times(1).returning(|slot| {
            Err(err_with_loc!(ScannerError::UpstreamUnavailable(format!("get_block slot {}", slot))))
        });

        let scanner = scanner(located(&token), history_starting_at(START_SLOT), block_fetcher, 100);
        let error = scanner.scan(&token, 3).await.unwrap_err();
        assert!(scanner_error(&error).is_some_and(ScannerError::is_upstream));
    }

    #[tokio::test]
    async fn cancelled_scan_stops() {
        let token = TestFixtures::token_address();
        let mut block_fetcher = MockBlockFetcher::new();
        block_fetcher.expect_fetch_block().never();

        let cancellation_token = CancellationToken::new();
        cancellation_token.cancel();
        let scanner = scanner(located(&token), history_starting_at(START_SLOT), block_fetcher, 100)
            .with_cancellation_token(cancellation_token);

        let error = scanner.scan(&token, 3).await.unwrap_err();
        assert!(matches!(scanner_error(&error), Some(ScannerError::Cancelled(_))));
    }
}
