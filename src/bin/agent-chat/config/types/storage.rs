use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store file; `<data_dir>/storage.json` when unset.
    pub path: Option<String>,
}
