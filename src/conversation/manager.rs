use super::error::StateError;
use super::id::ConversationId;
use super::state::Conversation;

/// What the active selection becomes after a delete.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NextActive {
    /// The deleted conversation was not active.
    Keep(ConversationId),
    /// The active conversation was deleted; select this one instead.
    Select(ConversationId),
    /// Nothing is left. The caller must create a conversation right away.
    CreateNew,
}

/// Removes `id` from `conversations`, choosing the next active conversation.
pub fn delete_conversation(
    conversations: Vec<Conversation>,
    id: ConversationId,
    active_id: ConversationId,
) -> (Vec<Conversation>, NextActive) {
    let remaining: Vec<Conversation> = conversations.into_iter().filter(|c| c.id != id).collect();
    let next = if id != active_id {
        NextActive::Keep(active_id)
    } else {
        match remaining.first() {
            Some(first) => NextActive::Select(first.id),
            None => NextActive::CreateNew,
        }
    };
    (remaining, next)
}

/// All conversations plus the active selection.
///
/// The active id names an existing conversation except between a delete that
/// returned [`NextActive::CreateNew`] and the following [`ChatState::insert_front`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    conversations: Vec<Conversation>,
    active_id: ConversationId,
}

impl ChatState {
    pub fn new(
        conversations: Vec<Conversation>,
        active_id: ConversationId,
    ) -> Result<Self, StateError> {
        if conversations.is_empty() {
            return Err(StateError::Empty);
        }
        if !conversations.iter().any(|c| c.id == active_id) {
            return Err(StateError::UnknownConversation(active_id));
        }
        Ok(Self {
            conversations,
            active_id,
        })
    }

    /// A state holding just `conversation`, which is active.
    pub fn single(conversation: Conversation) -> Self {
        Self {
            active_id: conversation.id,
            conversations: vec![conversation],
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active_id(&self) -> ConversationId {
        self.active_id
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.get(self.active_id)
    }

    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ConversationId) -> bool {
        self.get(id).is_some()
    }

    /// Puts a conversation at the top of the list and makes it active.
    pub fn insert_front(&mut self, conversation: Conversation) {
        self.active_id = conversation.id;
        self.conversations.insert(0, conversation);
    }

    pub fn select(&mut self, id: ConversationId) -> Result<(), StateError> {
        if !self.contains(id) {
            return Err(StateError::UnknownConversation(id));
        }
        self.active_id = id;
        Ok(())
    }

    /// Replaces conversation `id` with `f(conversation)`, keeping its position.
    pub fn update<F>(&mut self, id: ConversationId, f: F) -> Result<&Conversation, StateError>
    where
        F: FnOnce(Conversation) -> Conversation,
    {
        let index = self
            .conversations
            .iter()
            .position(|c| c.id == id)
            .ok_or(StateError::UnknownConversation(id))?;
        let current = self.conversations.remove(index);
        self.conversations.insert(index, f(current));
        Ok(&self.conversations[index])
    }

    pub fn delete(&mut self, id: ConversationId) -> Result<NextActive, StateError> {
        if !self.contains(id) {
            return Err(StateError::UnknownConversation(id));
        }
        let conversations = std::mem::take(&mut self.conversations);
        let (remaining, next) = delete_conversation(conversations, id, self.active_id);
        self.conversations = remaining;
        match next {
            NextActive::Keep(active) | NextActive::Select(active) => self.active_id = active,
            NextActive::CreateNew => {}
        }
        Ok(next)
    }
}
