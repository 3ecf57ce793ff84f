use serde::{Deserialize, Serialize};

/// `[logging]`: the log file rotates by size and keeps a few old files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or filter spec; `RUST_LOG` takes precedence.
    pub level: String,
    /// Log file; `<data_dir>/logs/agent-chat.log` when unset.
    pub file: Option<String>,
    pub max_size_mb: u64,
    pub keep_files: usize,
}

impl LoggingConfig {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.max(1) * 1024 * 1024
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_size_mb: 10,
            keep_files: 5,
        }
    }
}
