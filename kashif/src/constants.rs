/// ======================= Deployer history =======================
/// Parsed transaction type emitted when a liquidity pool is created
pub const CREATE_POOL: &str = "CREATE_POOL";

/// Parsed transaction type emitted when liquidity is added to a pool
pub const ADD_LIQUIDITY: &str = "ADD_LIQUIDITY";

/// Liquidity source the deployer history is filtered to
pub const DEFAULT_LIQUIDITY_SOURCE: &str = "RAYDIUM";

/// Helius enhanced transactions API base URL
pub const HELIUS_API_URL: &str = "https://api.helius.xyz/v0";

/// ======================= Mint export =======================
/// Solscan token transfer CSV export endpoint
pub const SOLSCAN_EXPORT_URL: &str = "https://api.solscan.io/v2/transfer/export_token";

/// Lower bound of the export time window (2021-01-17 00:00:00 UTC)
pub const EXPORT_WINDOW_START: i64 = 1_610_841_600;

/// Number of columns in every export row
pub const MINT_EXPORT_COLUMNS: usize = 15;

/// First column value of the export header row
pub const MINT_EXPORT_HEADER: &str = "type";

/// First column value of a mint row
pub const MINT_ROW_TYPE: &str = "mint";

/// ======================= Ledger scan =======================
/// Consecutive non-productive blocks tolerated before a scan gives up
pub const DEFAULT_STAGNATION_CEILING: usize = 100;

/// Substring of the RPC error returned for a slot without a block
pub const SKIPPED_SLOT_ERROR: &str = "was skipped";

/// Default HTTP timeout for the export and history clients
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

/// Default JSON-RPC timeout
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
