use super::error::PlaybackError;
use super::resource::AudioResource;

/// A way of getting audio out of the speakers.
///
/// Calls block until playback ends, so they run on the blocking pool.
pub trait PlaybackBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Exercises the output path without producing sound.
    fn unlock(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn play(&self, resource: &AudioResource) -> Result<(), PlaybackError>;
}

/// Outcome of one step of a [`PlaybackChain`].
#[derive(Debug)]
pub struct PlaybackAttempt {
    pub backend: String,
    pub result: Result<(), PlaybackError>,
}

impl PlaybackAttempt {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Backends tried in order until one plays the resource.
pub struct PlaybackChain {
    steps: Vec<Box<dyn PlaybackBackend>>,
}

impl PlaybackChain {
    pub fn new(
        primary: Box<dyn PlaybackBackend>,
        fallback: Option<Box<dyn PlaybackBackend>>,
    ) -> Self {
        let mut steps = vec![primary];
        steps.extend(fallback);
        Self { steps }
    }

    pub fn primary(&self) -> &dyn PlaybackBackend {
        self.steps[0].as_ref()
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Plays `resource`, stopping at the first backend that succeeds.
    ///
    /// Every attempt made is returned in order; the last one tells whether
    /// the chain as a whole succeeded.
    pub fn play(&self, resource: &AudioResource) -> Vec<PlaybackAttempt> {
        let mut attempts = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            let result = step.play(resource);
            match &result {
                Ok(()) => log::debug!("audio played via {}", step.name()),
                Err(err) => log::warn!("{} playback failed: {err}", step.name()),
            }
            let done = result.is_ok();
            attempts.push(PlaybackAttempt {
                backend: step.name().to_string(),
                result,
            });
            if done {
                break;
            }
        }
        attempts
    }
}

impl std::fmt::Debug for PlaybackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackChain")
            .field("steps", &self.names())
            .finish()
    }
}
