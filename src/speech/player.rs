use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::backend::{PlaybackAttempt, PlaybackChain};
use super::error::PlaybackError;
use super::notify::{LogNotifier, Notifier, PLAYBACK_FAILED_NOTICE};
use super::synth::SpeechSynthesizer;

const PREVIEW_CHARS: usize = 50;

#[derive(Debug)]
pub enum SpeechOutcome {
    /// Nothing to say.
    Skipped,
    /// Synthesis failed; nothing was played.
    Abandoned(PlaybackError),
    Played {
        backend: String,
        attempts: Vec<PlaybackAttempt>,
    },
    /// Every backend failed and the user was notified.
    Failed { attempts: Vec<PlaybackAttempt> },
}

impl SpeechOutcome {
    pub fn played(&self) -> bool {
        matches!(self, SpeechOutcome::Played { .. })
    }
}

/// Speaks agent replies aloud.
///
/// Audio output starts locked. Each `speak` made while locked first runs the
/// primary backend's unlock cycle; any successful unlock or playback leaves
/// the player unlocked for good.
pub struct SpeechPlayer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    chain: Arc<PlaybackChain>,
    notifier: Arc<dyn Notifier>,
    unlocked: AtomicBool,
}

impl SpeechPlayer {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, chain: PlaybackChain) -> Self {
        Self {
            synthesizer,
            chain: Arc::new(chain),
            notifier: Arc::new(LogNotifier),
            unlocked: AtomicBool::new(false),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.load(Ordering::Acquire)
    }

    pub fn chain(&self) -> &PlaybackChain {
        &self.chain
    }

    /// Runs the primary backend's silent play/pause cycle.
    pub async fn unlock(&self) -> bool {
        let chain = Arc::clone(&self.chain);
        let result = tokio::task::spawn_blocking(move || chain.primary().unlock())
            .await
            .map_err(|e| PlaybackError::Task(e.to_string()))
            .and_then(|unlocked| unlocked);
        match result {
            Ok(()) => {
                self.unlocked.store(true, Ordering::Release);
                log::debug!("audio output unlocked");
                true
            }
            Err(err) => {
                log::info!("audio unlock failed: {err}");
                false
            }
        }
    }

    pub async fn speak(&self, text: &str) -> SpeechOutcome {
        if text.trim().is_empty() {
            return SpeechOutcome::Skipped;
        }
        if !self.is_unlocked() {
            self.unlock().await;
        }

        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        log::debug!("generating speech for: {preview}");
        let resource = match self.synthesizer.synthesize(text).await {
            Ok(resource) => resource,
            Err(err) => {
                log::error!("speech synthesis failed: {err}");
                return SpeechOutcome::Abandoned(err);
            }
        };
        log::debug!("audio resource ready: {resource:?}");

        let chain = Arc::clone(&self.chain);
        let joined = tokio::task::spawn_blocking(move || {
            let attempts = chain.play(&resource);
            resource.release();
            attempts
        })
        .await;
        let attempts = match joined {
            Ok(attempts) => attempts,
            Err(err) => vec![PlaybackAttempt {
                backend: "playback task".to_string(),
                result: Err(PlaybackError::Task(err.to_string())),
            }],
        };

        let winner = attempts
            .iter()
            .find(|attempt| attempt.succeeded())
            .map(|attempt| attempt.backend.clone());
        match winner {
            Some(backend) => {
                self.unlocked.store(true, Ordering::Release);
                SpeechOutcome::Played { backend, attempts }
            }
            None => {
                self.notifier.notify(PLAYBACK_FAILED_NOTICE);
                SpeechOutcome::Failed { attempts }
            }
        }
    }

    /// Speaks `text` in the background.
    pub fn speak_detached(self: &Arc<Self>, text: String) -> JoinHandle<SpeechOutcome> {
        let player = Arc::clone(self);
        tokio::spawn(async move { player.speak(&text).await })
    }
}

impl std::fmt::Debug for SpeechPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechPlayer")
            .field("chain", &self.chain)
            .field("unlocked", &self.is_unlocked())
            .finish()
    }
}
