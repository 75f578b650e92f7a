use serde::Deserialize;
use serde::Serialize;
use solana_transaction_status::EncodedTransaction;
use solana_transaction_status::Reward;
use solana_transaction_status::UiConfirmedBlock;

/// One account touched by a transaction, in message order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKey {
    pub public_key: String,
    pub is_signer: bool,
}

impl AccountKey {
    pub fn new(
        public_key: impl Into<String>,
        is_signer: bool,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            is_signer,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransaction {
    pub account_keys: Vec<AccountKey>,
    pub signatures: Vec<String>,
}

/// Read-only projection of a `getBlock` result with account-level detail
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    pub blockhash: String,
    pub previous_blockhash: String,
    pub parent_slot: u64,
    pub transactions: Vec<AccountTransaction>,
    pub signatures: Vec<String>,
    pub rewards: Vec<Reward>,
    pub block_time: Option<i64>,
    pub block_height: Option<u64>,
}

impl From<UiConfirmedBlock> for Block {
    fn from(block: UiConfirmedBlock) -> Self {
        // Only the account list encoding carries what the scan needs
        let transactions = block
            .transactions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|transaction| match transaction.transaction {
                EncodedTransaction::Accounts(accounts) => Some(AccountTransaction {
                    account_keys: accounts
                        .account_keys
                        .into_iter()
                        .map(|account| AccountKey::new(account.pubkey, account.signer))
                        .collect(),
                    signatures: accounts.signatures,
                }),
                _ => None,
            })
            .collect();

        Self {
            blockhash: block.blockhash,
            previous_blockhash: block.previous_blockhash,
            parent_slot: block.parent_slot,
            transactions,
            signatures: block.signatures.unwrap_or_default(),
            rewards: block.rewards.unwrap_or_default(),
            block_time: block.block_time,
            block_height: block.block_height,
        }
    }
}

/// Result of fetching one slot
#[derive(Debug, Clone)]
pub enum FetchedBlock {
    Block(Block),
    // Slot produced no block; not an error
    Skipped { slot: u64 },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn converts_account_list_block() {
        let ui_block: UiConfirmedBlock = serde_json::from_value(json!({
            "blockhash": "5xgYt3b5bvUQpUz4Z7ArTTRxk7DDyAX3tAbVzEjGvnPE",
            "previousBlockhash": "4sGjMW1sUnHzSxGspuhpqLDx6wiyjNtZAMdL4VZHirAn",
            "parentSlot": 99,
            "blockTime": 1_700_000_000,
            "blockHeight": 88,
            "transactions": [
                {
                    "meta": null,
                    "transaction": {
                        "accountKeys": [
                            { "pubkey": "Buyer111", "signer": true, "writable": true, "source": "transaction" },
                            { "pubkey": "Token111", "signer": false, "writable": false, "source": "transaction" }
                        ],
                        "signatures": ["sig-1"]
                    }
                }
            ]
        }))
        .unwrap();

        let block = Block::from(ui_block);
        assert_eq!(block.parent_slot, 99);
        assert_eq!(block.block_time, Some(1_700_000_000));
        assert_eq!(block.block_height, Some(88));
        assert!(block.signatures.is_empty());
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.transactions[0].account_keys, vec![
            AccountKey::new("Buyer111", true),
            AccountKey::new("Token111", false),
        ]);
        assert_eq!(block.transactions[0].signatures, vec!["sig-1".to_string()]);
    }
}
