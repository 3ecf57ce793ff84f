use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Url};
use serde::Serialize;

use super::error::PlaybackError;
use super::resource::{AudioResource, AUDIO_MPEG};

pub const DEFAULT_TTS_PATH: &str = "api/voice/tts";

/// Turns text into encoded audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<AudioResource, PlaybackError>;
}

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
}

/// Client for the `POST /api/voice/tts` endpoint, which answers with `audio/mpeg`.
#[derive(Debug, Clone)]
pub struct HttpSpeechClient {
    client: Client,
    url: Url,
    timeout_seconds: Option<u64>,
}

impl HttpSpeechClient {
    pub fn new(base_url: &Url, path: &str) -> Result<Self, PlaybackError> {
        Self::with_client(Client::new(), base_url, path)
    }

    pub fn with_client(client: Client, base_url: &Url, path: &str) -> Result<Self, PlaybackError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let joined = format!("{}/", base.path());
            base.set_path(&joined);
        }
        let url = base
            .join(path.trim_start_matches('/'))
            .map_err(|e| PlaybackError::Http(e.to_string()))?;
        Ok(Self {
            client,
            url,
            timeout_seconds: None,
        })
    }

    pub fn timeout_seconds(mut self, timeout: Option<u64>) -> Self {
        self.timeout_seconds = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechClient {
    async fn synthesize(&self, text: &str) -> Result<AudioResource, PlaybackError> {
        let mut request = self.client.post(self.url.clone()).json(&TtsRequest { text });
        if let Some(timeout) = self.timeout_seconds {
            request = request.timeout(Duration::from_secs(timeout));
        }
        let response = request.send().await?;
        let status = response.status();
        log::debug!("speech synthesis HTTP status: {status}");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlaybackError::Synthesis {
                status: status.as_u16(),
                body,
            });
        }
        let audio: Bytes = response.bytes().await?;
        log::debug!("received {} bytes of audio", audio.len());
        Ok(AudioResource::new(audio, AUDIO_MPEG))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn posts_text_and_returns_audio_bytes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/voice/tts")
            .match_body(Matcher::Json(json!({"text": "Hello back"})))
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(b"ID3\x04fake-mp3".as_slice())
            .create_async()
            .await;

        let base = Url::parse(&server.url()).unwrap();
        let client = HttpSpeechClient::new(&base, DEFAULT_TTS_PATH).unwrap();
        let audio = client.synthesize("Hello back").await.unwrap();
        assert_eq!(audio.bytes().as_ref(), b"ID3\x04fake-mp3");
        assert_eq!(audio.mime(), "audio/mpeg");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_is_a_synthesis_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/voice/tts")
            .with_status(500)
            .with_body(r#"{"success":false,"error":"ElevenLabs API key not configured"}"#)
            .create_async()
            .await;

        let base = Url::parse(&server.url()).unwrap();
        let client = HttpSpeechClient::new(&base, "/api/voice/tts").unwrap();
        match client.synthesize("hi").await {
            Err(PlaybackError::Synthesis { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("not configured"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
