use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use reqwest::Url;

use agent_chat::controller::ChatController;
use agent_chat::speech::{
    CommandBackend, HttpSpeechClient, PlaybackBackend, PlaybackChain, SpeechPlayer,
};
use agent_chat::store::{
    ConversationStore, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StoreError,
};
use agent_chat::transport::{AgentClientConfig, HttpAgentClient};

use crate::args::CliArgs;
use crate::config::{AgentConfig, AppConfig, ConfigPaths, PlayerConfig, SpeechConfig};

use super::notify::StderrNotifier;

pub(super) type Controller = ChatController<HttpAgentClient, StoreBackend>;

/// Command-line choices that shape the controller.
#[derive(Debug, Clone)]
pub(super) struct SetupOptions {
    pub base_url: Option<String>,
    pub ephemeral: bool,
    pub speech: bool,
    pub auto_speak: Option<bool>,
}

impl SetupOptions {
    pub(super) fn from_args(args: &CliArgs, interactive: bool) -> Self {
        Self {
            base_url: args.base_url.clone(),
            ephemeral: args.ephemeral,
            speech: !args.no_speech,
            // One-shot runs speak explicitly instead of in the background.
            auto_speak: if interactive { args.speak.then_some(true) } else { Some(false) },
        }
    }
}

/// Where conversations are kept for this run.
#[derive(Debug)]
pub(super) enum StoreBackend {
    File(FileKeyValueStore),
    Memory(MemoryKeyValueStore),
}

impl KeyValueStore for StoreBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            StoreBackend::File(store) => store.get(key),
            StoreBackend::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            StoreBackend::File(store) => store.set(key, value),
            StoreBackend::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            StoreBackend::File(store) => store.remove(key),
            StoreBackend::Memory(store) => store.remove(key),
        }
    }
}

pub(super) fn build_controller(
    config: &AppConfig,
    paths: &ConfigPaths,
    options: &SetupOptions,
) -> anyhow::Result<Controller> {
    let raw_base = options
        .base_url
        .as_deref()
        .unwrap_or(&config.agent.base_url);
    let base_url = parse_url(raw_base)?;
    let transport = Arc::new(HttpAgentClient::new(agent_client_config(
        &config.agent,
        base_url.clone(),
    )));

    let store = open_store(config, paths, options.ephemeral)?;
    let mut controller = ChatController::new(ConversationStore::new(store), transport);

    if options.speech && config.speech.enabled {
        let player = build_speech_player(&config.speech, &base_url)?;
        let auto_speak = options.auto_speak.unwrap_or(config.speech.auto_speak);
        controller = controller.with_speech(Arc::new(player), auto_speak);
    }
    Ok(controller)
}

fn parse_url(raw: &str) -> anyhow::Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid service URL: {raw}"))
}

fn agent_client_config(agent: &AgentConfig, base_url: Url) -> AgentClientConfig {
    let mut client_config = AgentClientConfig::new(base_url);
    client_config.chat_path = agent.chat_path.clone();
    client_config.session_path = agent.session_path.clone();
    client_config.health_path = agent.health_path.clone();
    client_config.timeout_seconds = agent.timeout_seconds;
    client_config
}

fn open_store(
    config: &AppConfig,
    paths: &ConfigPaths,
    ephemeral: bool,
) -> anyhow::Result<StoreBackend> {
    if ephemeral {
        log::info!("ephemeral run: conversations are not saved");
        return Ok(StoreBackend::Memory(MemoryKeyValueStore::new()));
    }
    let path = config
        .storage
        .path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.storage_file());
    let store = FileKeyValueStore::open_lenient(&path)
        .with_context(|| format!("failed to open conversation store {}", path.display()))?;
    log::debug!("conversation store at {}", store.path().display());
    Ok(StoreBackend::File(store))
}

fn build_speech_player(speech: &SpeechConfig, agent_base: &Url) -> anyhow::Result<SpeechPlayer> {
    let base = match speech.base_url.as_deref() {
        Some(raw) => parse_url(raw)?,
        None => agent_base.clone(),
    };
    let synthesizer =
        HttpSpeechClient::new(&base, &speech.tts_path)?.timeout_seconds(speech.timeout_seconds);
    let primary = build_backend(&speech.primary)?;
    let fallback = speech.fallback.as_ref().map(build_backend).transpose()?;
    let chain = PlaybackChain::new(primary, fallback);
    log::debug!(
        "speech via {} with players {:?}",
        synthesizer.url(),
        chain.names()
    );
    Ok(SpeechPlayer::new(Arc::new(synthesizer), chain).with_notifier(Arc::new(StderrNotifier)))
}

fn build_backend(player: &PlayerConfig) -> anyhow::Result<Box<dyn PlaybackBackend>> {
    match player {
        PlayerConfig::Builtin => builtin_backend(),
        PlayerConfig::Command { command } => CommandBackend::parse(command)
            .map(|backend| Box::new(backend) as Box<dyn PlaybackBackend>)
            .ok_or_else(|| anyhow!("speech player command is empty")),
    }
}

#[cfg(feature = "rodio")]
fn builtin_backend() -> anyhow::Result<Box<dyn PlaybackBackend>> {
    Ok(Box::new(agent_chat::speech::RodioBackend))
}

#[cfg(not(feature = "rodio"))]
fn builtin_backend() -> anyhow::Result<Box<dyn PlaybackBackend>> {
    use agent_chat::speech::DEFAULT_PRIMARY_PLAYER;

    log::warn!("built-in audio player not compiled in, using `{DEFAULT_PRIMARY_PLAYER}`");
    build_backend(&PlayerConfig::Command {
        command: DEFAULT_PRIMARY_PLAYER.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_in(dir: &std::path::Path) -> ConfigPaths {
        ConfigPaths {
            config_file: dir.join("config.toml"),
            data_dir: dir.to_path_buf(),
        }
    }

    fn options(ephemeral: bool) -> SetupOptions {
        SetupOptions {
            base_url: None,
            ephemeral,
            speech: false,
            auto_speak: None,
        }
    }

    #[test]
    fn cli_base_url_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(true);
        opts.base_url = Some("http://override.local:9000/".into());
        let controller = build_controller(&AppConfig::default(), &paths_in(dir.path()), &opts).unwrap();
        assert_eq!(
            controller.transport().config().base_url.as_str(),
            "http://override.local:9000/"
        );
        assert!(controller.speech().is_none());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut opts = options(true);
        opts.base_url = Some("not a url".into());
        assert!(build_controller(&AppConfig::default(), &paths_in(dir.path()), &opts).is_err());
    }

    #[test]
    fn file_store_lives_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let controller =
            build_controller(&AppConfig::default(), &paths_in(dir.path()), &options(false))
                .unwrap();
        assert!(matches!(controller.store().backend(), StoreBackend::File(_)));
        assert_eq!(controller.conversations().len(), 2);
    }

    #[test]
    fn speech_player_uses_configured_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.speech.primary = PlayerConfig::Command {
            command: "aplay -q".into(),
        };
        config.speech.auto_speak = true;
        let mut opts = options(true);
        opts.speech = true;

        let controller = build_controller(&config, &paths_in(dir.path()), &opts).unwrap();
        let player = controller.speech().unwrap();
        assert_eq!(
            player.chain().names(),
            ["command:aplay", "command:mpv"]
        );
        assert!(controller.auto_speak());
    }

    #[test]
    fn blank_player_command_is_an_error() {
        let blank = PlayerConfig::Command {
            command: "  ".into(),
        };
        assert!(build_backend(&blank).is_err());
    }
}
