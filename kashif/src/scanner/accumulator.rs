use std::collections::HashSet;

use tokio::sync::RwLock;

use crate::model::AccountTransaction;
use crate::model::Block;
use crate::utils::same_address;

#[derive(Debug, Default)]
struct AddressSetInner {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

/// Insertion-ordered, deduplicated set of buyer addresses that never grows
/// past its limit. Owned by one scan.
#[derive(Debug)]
pub struct AddressSet {
    limit: usize,
    inner: RwLock<AddressSetInner>,
}

impl AddressSet {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            inner: RwLock::new(AddressSetInner::default()),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.ordered.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn is_full(&self) -> bool {
        self.len().await >= self.limit
    }

    pub async fn contains(
        &self,
        address: &str,
    ) -> bool {
        self.inner.read().await.seen.contains(address)
    }

    /// Insert in order until the limit is hit. Returns how many were new.
    pub async fn extend<I>(
        &self,
        candidates: I,
    ) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut inner = self.inner.write().await;
        let mut added = 0;
        for candidate in candidates {
            if inner.ordered.len() >= self.limit {
                break;
            }
            if inner.seen.insert(candidate.clone()) {
                inner.ordered.push(candidate);
                added += 1;
            }
        }
        added
    }

    pub async fn insert(
        &self,
        address: impl Into<String>,
    ) -> bool {
        self.extend([address.into()]).await == 1
    }

    /// Add the buyers of `token_address` found in `block`
    pub async fn add_from_block(
        &self,
        block: &Block,
        token_address: &str,
    ) -> usize {
        let candidates = extract_buyer_candidates(block, token_address);
        if candidates.is_empty() {
            return 0;
        }
        self.extend(candidates).await
    }

    pub fn into_addresses(self) -> Vec<String> {
        self.inner.into_inner().ordered
    }
}

/// Signer credited with a transaction that touches `token_address`.
///
/// Account keys are walked in message order. Every signer seen replaces the
/// current one, and the walk stops at the token once a signer is known. A
/// transaction that touches the token before any signer appears is credited
/// to the last signer in the list, and one with no signer at all yields
/// nothing.
pub fn buyer_candidate<'a>(
    transaction: &'a AccountTransaction,
    token_address: &str,
) -> Option<&'a str> {
    let mut signer: Option<&'a str> = None;
    let mut touches_token = false;

    for account in &transaction.account_keys {
        if account.is_signer {
            signer = Some(account.public_key.as_str());
        }
        if same_address(&account.public_key, token_address) {
            touches_token = true;
            if signer.is_some() {
                break;
            }
        }
    }

    if touches_token { signer } else { None }
}

/// Buyer candidates of a block in transaction order, duplicates included
pub fn extract_buyer_candidates(
    block: &Block,
    token_address: &str,
) -> Vec<String> {
    block
        .transactions
        .iter()
        .filter_map(|transaction| buyer_candidate(transaction, token_address))
        .map(str::to_string)
        .collect()
}
