use std::fmt;

use bytes::Bytes;

pub const AUDIO_MPEG: &str = "audio/mpeg";

type ReleaseHook = Box<dyn FnOnce() + Send + Sync>;

/// Synthesized audio owned by a single `speak` call.
///
/// Backends borrow it; the owner releases it once playback has reached a
/// terminal state. Dropping an unreleased resource releases it.
pub struct AudioResource {
    bytes: Bytes,
    mime: &'static str,
    on_release: Option<ReleaseHook>,
    released: bool,
}

impl AudioResource {
    pub fn new(bytes: Bytes, mime: &'static str) -> Self {
        Self {
            bytes,
            mime,
            on_release: None,
            released: false,
        }
    }

    pub fn mpeg(bytes: Bytes) -> Self {
        Self::new(bytes, AUDIO_MPEG)
    }

    /// Runs `hook` when the resource is released.
    pub fn on_release(mut self, hook: impl FnOnce() + Send + Sync + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension players use to pick a demuxer.
    pub fn extension(&self) -> &'static str {
        match self.mime {
            AUDIO_MPEG => ".mp3",
            "audio/wav" | "audio/x-wav" => ".wav",
            _ => ".bin",
        }
    }

    pub fn release(mut self) {
        self.release_in_place();
    }

    fn release_in_place(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.bytes = Bytes::new();
        if let Some(hook) = self.on_release.take() {
            hook();
        }
    }
}

impl Drop for AudioResource {
    fn drop(&mut self) {
        self.release_in_place();
    }
}

impl fmt::Debug for AudioResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioResource")
            .field("len", &self.bytes.len())
            .field("mime", &self.mime)
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counted(counter: &Arc<AtomicUsize>) -> AudioResource {
        let counter = Arc::clone(counter);
        AudioResource::mpeg(Bytes::from_static(b"ID3")).on_release(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn explicit_release_runs_hook_once() {
        let releases = Arc::new(AtomicUsize::new(0));
        counted(&releases).release();
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_releases_too() {
        let releases = Arc::new(AtomicUsize::new(0));
        {
            let resource = counted(&releases);
            assert_eq!(resource.extension(), ".mp3");
            assert_eq!(resource.len(), 3);
        }
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }
}
