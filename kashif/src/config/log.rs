use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    // Directory where logs will be stored
    pub directory: Option<String>,
    // Write rolling log files in addition to the console
    pub file_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: Some(".logs".to_string()),
            file_output: true,
        }
    }
}
