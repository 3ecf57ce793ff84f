//! In-memory conversations and the pure operations that evolve them.

mod error;
mod id;
mod manager;
mod message;
mod state;
mod validate;

pub use error::StateError;
pub use id::{ConversationId, MessageId};
pub use manager::{delete_conversation, ChatState, NextActive};
pub use message::{Message, Sender};
pub use state::{Conversation, DEFAULT_TITLE, GREETING};
pub use validate::{validate_message, ValidationError};
