pub mod block;
pub mod history;
pub mod mint;
pub mod occurrence;
pub mod report;

pub use block::AccountKey;
pub use block::AccountTransaction;
pub use block::Block;
pub use block::FetchedBlock;
pub use history::DeployerTransaction;
pub use history::TransactionErrorState;
pub use history::TransactionType;
pub use mint::MintTransactionRecord;
pub use occurrence::FirstBuyerResult;
pub use occurrence::WalletOccurrence;
pub use report::ScanReport;
pub use report::Termination;
