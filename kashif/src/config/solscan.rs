use serde::Deserialize;
use serde::Serialize;

use crate::constants::EXPORT_WINDOW_START;
use crate::constants::SOLSCAN_EXPORT_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolscanConfig {
    pub export_url: String,
    // Sent as the `token` header when present
    pub api_key: Option<String>,
    // Unix seconds; the export window always ends at the request time
    pub time_from: i64,
}

impl Default for SolscanConfig {
    fn default() -> Self {
        Self {
            export_url: SOLSCAN_EXPORT_URL.to_string(),
            api_key: None,
            time_from: EXPORT_WINDOW_START,
        }
    }
}
