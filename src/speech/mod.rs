//! Text-to-speech playback of agent replies.
//!
//! Audio is fetched from the synthesis endpoint, then handed to an ordered
//! chain of playback backends. Only when every backend fails is the user
//! told about it.

mod backend;
mod command;
mod error;
mod notify;
mod player;
mod resource;
#[cfg(feature = "rodio")]
mod rodio_backend;
mod synth;

pub use backend::{PlaybackAttempt, PlaybackBackend, PlaybackChain};
pub use command::{CommandBackend, DEFAULT_FALLBACK_PLAYER, DEFAULT_PRIMARY_PLAYER};
pub use error::PlaybackError;
pub use notify::{LogNotifier, Notifier, PLAYBACK_FAILED_NOTICE};
pub use player::{SpeechOutcome, SpeechPlayer};
pub use resource::{AudioResource, AUDIO_MPEG};
#[cfg(feature = "rodio")]
pub use rodio_backend::RodioBackend;
pub use synth::{HttpSpeechClient, SpeechSynthesizer, DEFAULT_TTS_PATH};

/// Whether an agent reply should be read aloud automatically.
///
/// Replies that look like apologies or error reports are kept silent.
pub fn should_auto_speak(reply: &str) -> bool {
    !reply.trim().is_empty() && !reply.contains("Error") && !reply.contains("sorry")
}
