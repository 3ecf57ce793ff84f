use std::io::Write;
use std::process::{Command, Stdio};

use super::backend::PlaybackBackend;
use super::error::PlaybackError;
use super::resource::AudioResource;

pub const DEFAULT_PRIMARY_PLAYER: &str = "ffplay -nodisp -autoexit -loglevel quiet";
pub const DEFAULT_FALLBACK_PLAYER: &str = "mpv --no-video --really-quiet";

/// Plays audio by handing a temporary file to an external program.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    label: String,
    program: String,
    args: Vec<String>,
}

impl CommandBackend {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        Self {
            label: format!("command:{program}"),
            program,
            args,
        }
    }

    /// Splits a command line on whitespace. Returns `None` when it is blank.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(&self, message: impl Into<String>) -> PlaybackError {
        PlaybackError::Player {
            program: self.program.clone(),
            message: message.into(),
        }
    }
}

impl PlaybackBackend for CommandBackend {
    fn name(&self) -> &str {
        &self.label
    }

    fn play(&self, resource: &AudioResource) -> Result<(), PlaybackError> {
        if resource.is_empty() {
            return Err(PlaybackError::Decode("empty audio payload".to_string()));
        }
        let mut file = tempfile::Builder::new()
            .prefix("agent-chat-")
            .suffix(resource.extension())
            .tempfile()?;
        file.write_all(resource.bytes())?;
        file.flush()?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| self.failure(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(self.failure(format!("exited with {status}")))
        }
    }
}
