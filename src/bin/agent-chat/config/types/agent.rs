use serde::{Deserialize, Serialize};

use agent_chat::transport::{DEFAULT_CHAT_PATH, DEFAULT_HEALTH_PATH, DEFAULT_SESSION_PATH};

use super::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    pub base_url: String,
    pub chat_path: String,
    pub session_path: String,
    pub health_path: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            session_path: DEFAULT_SESSION_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            timeout_seconds: None,
        }
    }
}
