use super::id::ConversationId;

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("unknown conversation: {0}")]
    UnknownConversation(ConversationId),
    #[error("conversation list is empty")]
    Empty,
}
