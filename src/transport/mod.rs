//! Exchange of messages with the remote agent.

mod error;
mod http;
mod types;

use async_trait::async_trait;

pub use error::TransportError;
pub use http::{
    AgentClientConfig, HttpAgentClient, DEFAULT_CHAT_PATH, DEFAULT_HEALTH_PATH,
    DEFAULT_SESSION_PATH,
};
pub use types::{AgentReply, SessionHandle};

/// A remote conversational agent.
///
/// Session ids are opaque. `None` means no session has been established yet;
/// the reply always carries the session the agent used.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    async fn send_message(
        &self,
        text: &str,
        session_id: Option<&str>,
    ) -> Result<AgentReply, TransportError>;

    async fn create_session(&self) -> Result<SessionHandle, TransportError>;

    async fn health(&self) -> Result<(), TransportError> {
        Ok(())
    }
}
