use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::constants::ADD_LIQUIDITY;
use crate::constants::CREATE_POOL;

/// Parsed transaction type reported by the history API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    CreatePool,
    AddLiquidity,
    Swap,
    Transfer,
    Other(String),
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            CREATE_POOL => TransactionType::CreatePool,
            ADD_LIQUIDITY => TransactionType::AddLiquidity,
            "SWAP" => TransactionType::Swap,
            "TRANSFER" => TransactionType::Transfer,
            _ => TransactionType::Other(value),
        }
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::CreatePool => CREATE_POOL.to_string(),
            TransactionType::AddLiquidity => ADD_LIQUIDITY.to_string(),
            TransactionType::Swap => "SWAP".to_string(),
            TransactionType::Transfer => "TRANSFER".to_string(),
            TransactionType::Other(other) => other,
        }
    }
}

impl TransactionType {
    /// Pool creation or first liquidity marks the start of trading
    pub fn opens_trading(&self) -> bool {
        matches!(self, TransactionType::CreatePool | TransactionType::AddLiquidity)
    }
}

/// Transaction error as a tagged value instead of free-form JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "Option<Value>")]
pub enum TransactionErrorState {
    #[default]
    None,
    Failed(Value),
}

impl From<Option<Value>> for TransactionErrorState {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => TransactionErrorState::None,
            Some(error) => TransactionErrorState::Failed(error),
        }
    }
}

impl From<TransactionErrorState> for Option<Value> {
    fn from(value: TransactionErrorState) -> Self {
        match value {
            TransactionErrorState::None => None,
            TransactionErrorState::Failed(error) => Some(error),
        }
    }
}

/// One entry of the deployer's parsed transaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployerTransaction {
    pub signature: String,
    pub slot: u64,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub fee_payer: String,
    #[serde(default)]
    pub transaction_error: TransactionErrorState,
}

/// Earliest slot at which the deployer opened trading, if any
pub fn first_trading_slot(history: &[DeployerTransaction]) -> Option<u64> {
    history
        .iter()
        .filter(|transaction| transaction.transaction_type.opens_trading())
        .map(|transaction| transaction.slot)
        .min()
}
