//! HTTP client for the agent service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::TransportError;
use super::types::{
    AgentChatRequest, AgentReply, ChatPayload, Envelope, ErrorBody, SessionHandle, SessionPayload,
};
use super::AgentTransport;

pub const DEFAULT_CHAT_PATH: &str = "api/agent/chat";
pub const DEFAULT_SESSION_PATH: &str = "api/agent/session/new";
pub const DEFAULT_HEALTH_PATH: &str = "api/agent/health";

/// Configuration for the agent client.
#[derive(Debug, Clone)]
pub struct AgentClientConfig {
    /// Service root, e.g. `http://localhost:5000/`.
    pub base_url: Url,
    pub chat_path: String,
    pub session_path: String,
    pub health_path: String,
    /// Request timeout in seconds. `None` waits for the service indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl AgentClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            session_path: DEFAULT_SESSION_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            timeout_seconds: None,
        }
    }
}

/// Client for the agent service.
///
/// Configuration sits behind an `Arc`, so clones share it.
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    config: Arc<AgentClientConfig>,
    client: Client,
}

impl HttpAgentClient {
    pub fn new(config: AgentClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: AgentClientConfig) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn config(&self) -> &AgentClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        let mut base = self.config.base_url.clone();
        if !base.path().ends_with('/') {
            let joined = format!("{}/", base.path());
            base.set_path(&joined);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))
    }

    fn apply_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.timeout_seconds {
            Some(timeout) => request.timeout(Duration::from_secs(timeout)),
            None => request,
        }
    }

    fn log_request_payload<T: Serialize>(&self, label: &str, body: &T) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        if let Ok(json) = serde_json::to_string(body) {
            log::trace!("{label}: {json}");
        }
    }

    async fn ensure_success_response(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response, TransportError> {
        log::debug!("{context} HTTP status: {}", response.status());
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        log::warn!("{context} failed with {status}: {error_text}");
        let message = serde_json::from_str::<ErrorBody>(&error_text)
            .ok()
            .and_then(|body| body.error.or(body.message))
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| format!("{context} returned error status: {status}"));
        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_and_parse<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T, TransportError> {
        let response = self.apply_timeout(request).send().await?;
        let response = self.ensure_success_response(response, context).await?;
        let resp_text = response.text().await?;
        log::trace!("{context} response: {resp_text}");
        let envelope: Envelope<T> =
            serde_json::from_str(&resp_text).map_err(|e| TransportError::ResponseFormat {
                message: format!("Failed to decode {context} response: {e}"),
                raw_response: resp_text.clone(),
            })?;
        match envelope.into_payload() {
            (Some(payload), _) => Ok(payload),
            (None, Some(error)) if !error.trim().is_empty() => Err(TransportError::Status {
                status: 200,
                message: error,
            }),
            (None, _) => Err(TransportError::ResponseFormat {
                message: format!("{context} response carried no data"),
                raw_response: resp_text,
            }),
        }
    }
}

#[async_trait]
impl AgentTransport for HttpAgentClient {
    async fn send_message(
        &self,
        text: &str,
        session_id: Option<&str>,
    ) -> Result<AgentReply, TransportError> {
        let url = self.endpoint(&self.config.chat_path)?;
        let body = AgentChatRequest {
            message: text,
            session_id,
        };
        self.log_request_payload("agent chat request", &body);
        let payload: ChatPayload = self
            .send_and_parse(self.client.post(url).json(&body), "Agent chat")
            .await?;
        Ok(AgentReply {
            message: payload.message.unwrap_or_default(),
            session_id: payload
                .session_id
                .or_else(|| session_id.map(str::to_string))
                .unwrap_or_default(),
        })
    }

    async fn create_session(&self) -> Result<SessionHandle, TransportError> {
        let url = self.endpoint(&self.config.session_path)?;
        let payload: SessionPayload = self
            .send_and_parse(self.client.post(url), "Session creation")
            .await?;
        match payload.session_id.filter(|id| !id.is_empty()) {
            Some(session_id) => Ok(SessionHandle { session_id }),
            None => Err(TransportError::ResponseFormat {
                message: "Session creation response carried no session id".to_string(),
                raw_response: String::new(),
            }),
        }
    }

    async fn health(&self) -> Result<(), TransportError> {
        let url = self.endpoint(&self.config.health_path)?;
        let response = self.apply_timeout(self.client.get(url)).send().await?;
        self.ensure_success_response(response, "Agent health check")
            .await?;
        Ok(())
    }
}
