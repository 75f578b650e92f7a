pub mod config;
pub mod constants;
pub mod datasource;
pub mod engine;
pub mod error;
pub mod model;
pub mod scanner;
pub mod service;
pub mod tracing;
pub mod utils;

pub use engine::*;
pub use error::*;
pub use service::FirstBuyerService;

// Test utilities - only compiled during testing
#[cfg(test)]
pub mod test_utils {
    pub mod fixtures;
    pub mod mocks;
}

pub use error::Result;
