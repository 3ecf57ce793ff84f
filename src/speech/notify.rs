pub const PLAYBACK_FAILED_NOTICE: &str = "Audio playback failed. Make sure an audio output device \
is available and a supported player is installed, then enable audio and try again.";

/// Receives notices the user must see.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Writes notices to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        log::error!("{message}");
    }
}
