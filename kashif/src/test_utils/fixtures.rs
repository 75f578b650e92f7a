use solana_pubkey::Pubkey;

use crate::model::AccountKey;
use crate::model::AccountTransaction;
use crate::model::Block;
use crate::model::DeployerTransaction;
use crate::model::MintTransactionRecord;
use crate::model::TransactionErrorState;
use crate::model::TransactionType;

/// Test fixtures for creating consistent test data
pub struct TestFixtures;

impl TestFixtures {
    /// A valid, unique token address
    pub fn token_address() -> String {
        Pubkey::new_unique().to_string()
    }

    /// Mint row for `token` deployed by `Deployer111` in signature `deploysig`
    pub fn mint_record(
        token: &str,
        slot: u64,
    ) -> MintTransactionRecord {
        MintTransactionRecord {
            kind: "mint".to_string(),
            slot: slot.to_string(),
            block_time_unix: "1700000000".to_string(),
            block_time: "2023-11-14 22:13:20".to_string(),
            fee: "5000".to_string(),
            is_inner: "false".to_string(),
            tx_hash: "deploysig".to_string(),
            source_owner_account: "Deployer111".to_string(),
            source_token_account: "DeployerAta111".to_string(),
            dest_owner_account: "Dest111".to_string(),
            dest_token_account: "DestAta111".to_string(),
            amount: "1000000000".to_string(),
            symbol: "TKN".to_string(),
            decimals: "6".to_string(),
            token_address: token.to_string(),
        }
    }

    pub fn deployer_transaction(
        kind: &str,
        slot: u64,
    ) -> DeployerTransaction {
        DeployerTransaction {
            signature: format!("sig-{}", slot),
            slot,
            timestamp: 1_700_000_000,
            transaction_type: TransactionType::from(kind.to_string()),
            source: "RAYDIUM".to_string(),
            fee_payer: "Deployer111".to_string(),
            transaction_error: TransactionErrorState::None,
        }
    }

    pub fn empty_block() -> Block {
        Block::default()
    }

    /// One transaction per buyer, each signed by the buyer and touching `token`
    pub fn block_with_buyers(
        token: &str,
        buyers: &[&str],
    ) -> Block {
        Block {
            transactions: buyers
                .iter()
                .map(|buyer| AccountTransaction {
                    account_keys: vec![
                        AccountKey::new(*buyer, true),
                        AccountKey::new("Pool111", false),
                        AccountKey::new(token, false),
                    ],
                    signatures: vec![format!("sig-{}", buyer)],
                })
                .collect(),
            ..Block::default()
        }
    }

    pub fn block_without_signers(token: &str) -> Block {
        Block {
            transactions: vec![AccountTransaction {
                account_keys: vec![AccountKey::new("Pool111", false), AccountKey::new(token, false)],
                signatures: vec!["sig-unsigned".to_string()],
            }],
            ..Block::default()
        }
    }
}
