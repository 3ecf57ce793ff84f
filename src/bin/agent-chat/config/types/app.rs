use serde::{Deserialize, Serialize};

use super::{AgentConfig, LoggingConfig, SpeechConfig, StorageConfig};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub speech: SpeechConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
