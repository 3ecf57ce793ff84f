//! Local persistence for the conversation list and the active selection.

mod conversation_store;
mod error;
mod file;
mod kv;
mod seed;

pub use conversation_store::{ConversationStore, ACTIVE_ID_KEY, CONVERSATIONS_KEY};
pub use error::StoreError;
pub use file::FileKeyValueStore;
pub use kv::{KeyValueStore, MemoryKeyValueStore};
pub use seed::seed_conversations;
