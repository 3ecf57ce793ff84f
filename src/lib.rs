//! Chat client for a remote conversational agent.
//!
//! Keeps a list of conversations, each holding the messages exchanged with
//! the agent and the agent-side session handle. The list and the active
//! selection survive restarts through a key/value store. Agent replies can
//! be read aloud through a text-to-speech endpoint and a chain of playback
//! backends.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use agent_chat::controller::ChatController;
//! use agent_chat::store::{ConversationStore, MemoryKeyValueStore};
//! use agent_chat::transport::{AgentClientConfig, HttpAgentClient};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentClientConfig::new("http://localhost:8000".parse()?);
//! let transport = Arc::new(HttpAgentClient::new(config));
//! let store = ConversationStore::new(MemoryKeyValueStore::new());
//! let mut chat = ChatController::new(store, transport);
//! if let Some(reply) = chat.send("Hi").await? {
//!     println!("{}", reply.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod conversation;
pub mod speech;
pub mod store;
pub mod transport;
