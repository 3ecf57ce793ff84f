use serde::{Deserialize, Serialize};

use agent_chat::speech::{DEFAULT_FALLBACK_PLAYER, DEFAULT_PRIMARY_PLAYER, DEFAULT_TTS_PATH};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    /// Read each agent reply aloud as it arrives.
    pub auto_speak: bool,
    /// Synthesis service root. Defaults to `agent.base_url`.
    pub base_url: Option<String>,
    pub tts_path: String,
    pub timeout_seconds: Option<u64>,
    pub primary: PlayerConfig,
    pub fallback: Option<PlayerConfig>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_speak: false,
            base_url: None,
            tts_path: DEFAULT_TTS_PATH.to_string(),
            timeout_seconds: None,
            primary: PlayerConfig::default(),
            fallback: Some(PlayerConfig::Command {
                command: DEFAULT_FALLBACK_PLAYER.to_string(),
            }),
        }
    }
}

/// How one playback step produces sound.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerConfig {
    /// In-process decoder; needs the `rodio` feature.
    Builtin,
    /// External program invoked with the audio file path as its last argument.
    Command { command: String },
}

impl Default for PlayerConfig {
    fn default() -> Self {
        if cfg!(feature = "rodio") {
            PlayerConfig::Builtin
        } else {
            PlayerConfig::Command {
                command: DEFAULT_PRIMARY_PLAYER.to_string(),
            }
        }
    }
}
