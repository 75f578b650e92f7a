pub mod config;
pub mod scanner;

pub use anyhow::Context;
pub use anyhow::Error;
pub use anyhow::Result;
pub use anyhow::anyhow;
pub use config::ConfigError;
pub use scanner::ScannerError;

// For consistent error handling with location info
#[macro_export]
macro_rules! err_with_loc {
    ($err:expr) => {
        anyhow::anyhow!($err).context(format!("at {}:{}", file!(), line!()))
    };
}

/// Find the scanner error kind behind an error, if any
pub fn scanner_error(error: &Error) -> Option<&ScannerError> {
    error.chain().find_map(|cause| cause.downcast_ref::<ScannerError>())
}
