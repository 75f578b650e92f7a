use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Invalid token address: {0}")]
    InvalidAddress(String),

    #[error("Mint transaction not found for token: {0}")]
    MintNotFound(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Failed to parse upstream payload: {0}")]
    Parse(String),

    #[error("Scan cancelled for token: {0}")]
    Cancelled(String),
}

impl ScannerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScannerError::MintNotFound(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, ScannerError::UpstreamUnavailable(_))
    }
}
