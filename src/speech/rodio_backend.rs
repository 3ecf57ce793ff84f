use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::backend::PlaybackBackend;
use super::error::PlaybackError;
use super::resource::AudioResource;

const UNLOCK_SAMPLE_RATE: u32 = 44_100;
const UNLOCK_DURATION: Duration = Duration::from_millis(10);

/// Decodes and plays audio in-process on the default output device.
#[derive(Debug, Default, Clone, Copy)]
pub struct RodioBackend;

impl RodioBackend {
    fn open() -> Result<(OutputStream, Sink), PlaybackError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| PlaybackError::Device(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| PlaybackError::Device(e.to_string()))?;
        Ok((stream, sink))
    }
}

impl PlaybackBackend for RodioBackend {
    fn name(&self) -> &str {
        "rodio"
    }

    fn unlock(&self) -> Result<(), PlaybackError> {
        let (_stream, sink) = Self::open()?;
        let silence =
            rodio::source::Zero::<f32>::new(1, UNLOCK_SAMPLE_RATE).take_duration(UNLOCK_DURATION);
        sink.append(silence);
        sink.play();
        sink.pause();
        sink.stop();
        Ok(())
    }

    fn play(&self, resource: &AudioResource) -> Result<(), PlaybackError> {
        let (_stream, sink) = Self::open()?;
        let source = Decoder::new(Cursor::new(resource.bytes().clone()))
            .map_err(|e| PlaybackError::Decode(e.to_string()))?;
        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}
