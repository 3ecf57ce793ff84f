use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::ConfigError;

const APP_DIR: &str = "agent-chat";
const CONFIG_FILE: &str = "config.toml";
const STORAGE_FILE: &str = "storage.json";

/// Where the client reads its config and keeps its data.
///
/// Logs and the conversation store live under `data_dir`; a `--config`
/// override only moves the config file.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(config_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
        let config_file = config_override
            .unwrap_or_else(|| home.join(".config").join(APP_DIR).join(CONFIG_FILE));
        Ok(Self {
            config_file,
            data_dir: home.join(".local").join("share").join(APP_DIR),
        })
    }

    pub fn config_dir(&self) -> &Path {
        match self.config_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    pub(super) fn create_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(self.config_dir())?;
        fs::create_dir_all(self.logs_dir())
    }
}
