use agent_chat::speech::Notifier;

use super::render;

/// Shows playback notices on the terminal and in the log.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        log::error!("{message}");
        render::alert(message);
    }
}
