use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_HTTP_TIMEOUT_MS;
use crate::constants::DEFAULT_STAGNATION_CEILING;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub stagnation_ceiling: usize,
    pub http_timeout_ms: u64,
    // None runs every token scan at once
    pub max_concurrent_scans: Option<usize>,
    pub retry: RetryPolicy,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            stagnation_ceiling: DEFAULT_STAGNATION_CEILING,
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            max_concurrent_scans: None,
            retry: RetryPolicy::default(),
        }
    }
}

impl ScannerConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

/// Retries apply to transport failures only. Zero retries by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub base_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_retry_delay_ms: 500,
            max_retry_delay_ms: 30_000,
        }
    }
}
