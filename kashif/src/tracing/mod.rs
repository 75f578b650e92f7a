mod file;
mod filter;
mod format;

pub use file::TracingGuard;
pub use file::setup_tracing;
pub use format::KashifFormat;
