use serde::Deserialize;
use serde::Serialize;

/// First buyers found for one token during fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstBuyerResult {
    pub token_address: String,
    pub addresses: Vec<String>,
}

impl FirstBuyerResult {
    pub fn new(
        token_address: impl Into<String>,
        addresses: Vec<String>,
    ) -> Self {
        Self {
            token_address: token_address.into(),
            addresses,
        }
    }

    /// Contribution of a token whose scan failed
    pub fn empty(token_address: impl Into<String>) -> Self {
        Self::new(token_address, Vec::new())
    }
}

/// A wallet and the tokens it was an early buyer of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletOccurrence {
    pub address: String,
    pub count: usize,
    pub occurrences: Vec<String>,
}

impl WalletOccurrence {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            count: 0,
            occurrences: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        token_address: &str,
    ) {
        self.count += 1;
        self.occurrences.push(token_address.to_string());
    }

    /// Seen in more than one token
    pub fn is_common(&self) -> bool {
        self.count > 1
    }
}
