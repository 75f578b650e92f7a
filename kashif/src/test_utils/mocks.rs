use async_trait::async_trait;
use mockall::mock;

use crate::Result;
use crate::datasource::BlockFetcher;
use crate::datasource::DeployerHistory;
use crate::datasource::MintLocator;
use crate::model::DeployerTransaction;
use crate::model::FetchedBlock;
use crate::model::MintTransactionRecord;

// Mock for the transfer export
mock! {
    pub MintLocator {}

    #[async_trait]
    impl MintLocator for MintLocator {
        async fn locate_mint(&self, token_address: &str) -> Result<MintTransactionRecord>;
    }
}

// Mock for the deployer history API
mock! {
    pub DeployerHistory {}

    #[async_trait]
    impl DeployerHistory for DeployerHistory {
        async fn transactions_until(&self, deployer: &str, until_signature: &str) -> Result<Vec<DeployerTransaction>>;
    }
}

// Mock for ledger RPC
mock! {
    pub BlockFetcher {}

    #[async_trait]
    impl BlockFetcher for BlockFetcher {
        async fn fetch_block(&self, slot: u64) -> Result<FetchedBlock>;
    }
}
