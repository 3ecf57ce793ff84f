use std::collections::HashSet;

use crate::conversation::{ChatState, Conversation, ConversationId};

use super::error::StoreError;
use super::kv::KeyValueStore;
use super::seed::seed_conversations;

pub const CONVERSATIONS_KEY: &str = "conversations";
pub const ACTIVE_ID_KEY: &str = "current_conversation_id";

/// Loads and saves [`ChatState`] through a [`KeyValueStore`].
#[derive(Debug)]
pub struct ConversationStore<S> {
    backend: S,
}

impl<S: KeyValueStore> ConversationStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the stored state, falling back to seed data.
    ///
    /// Never fails: unreadable values are logged and treated as absent.
    pub fn load(&self) -> ChatState {
        let conversations = self.load_conversations();
        let active_id = self
            .load_active_id()
            .filter(|id| conversations.iter().any(|c| c.id == *id))
            .unwrap_or(conversations[0].id);
        ChatState::new(conversations, active_id).unwrap_or_else(|err| {
            log::error!("stored conversations rejected ({err}), starting fresh");
            ChatState::single(Conversation::new(None))
        })
    }

    pub fn save(&mut self, state: &ChatState) -> Result<(), StoreError> {
        let payload = serde_json::to_string(state.conversations())?;
        self.backend.set(CONVERSATIONS_KEY, &payload)?;
        self.backend.set(ACTIVE_ID_KEY, &state.active_id().to_string())?;
        Ok(())
    }

    fn load_conversations(&self) -> Vec<Conversation> {
        let raw = match self.backend.get(CONVERSATIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return seed_conversations(),
            Err(err) => {
                log::warn!("failed to read stored conversations: {err}");
                return seed_conversations();
            }
        };
        match serde_json::from_str::<Vec<Conversation>>(&raw) {
            Ok(list) if list.is_empty() => seed_conversations(),
            Ok(list) => match check_conversations(&list) {
                Ok(()) => list,
                Err(problem) => {
                    log::warn!("stored conversations rejected: {problem}");
                    seed_conversations()
                }
            },
            Err(err) => {
                log::warn!("stored conversations are not valid JSON: {err}");
                seed_conversations()
            }
        }
    }

    fn load_active_id(&self) -> Option<ConversationId> {
        let raw = match self.backend.get(ACTIVE_ID_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                log::warn!("failed to read active conversation id: {err}");
                return None;
            }
        };
        match raw.parse() {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("ignoring active conversation id {raw:?}: {err}");
                None
            }
        }
    }
}

/// Every conversation keeps its greeting and no id appears twice.
fn check_conversations(list: &[Conversation]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(list.len());
    for conv in list {
        if conv.messages.is_empty() {
            return Err(format!("conversation {} has no messages", conv.id));
        }
        if !seen.insert(conv.id) {
            return Err(format!("conversation id {} is repeated", conv.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;
    use crate::store::{FileKeyValueStore, MemoryKeyValueStore};

    fn store_with(
        conversations: Option<&str>,
        active: Option<&str>,
    ) -> ConversationStore<MemoryKeyValueStore> {
        let mut backend = MemoryKeyValueStore::new();
        if let Some(raw) = conversations {
            backend.set(CONVERSATIONS_KEY, raw).unwrap();
        }
        if let Some(raw) = active {
            backend.set(ACTIVE_ID_KEY, raw).unwrap();
        }
        ConversationStore::new(backend)
    }

    #[test]
    fn empty_storage_loads_seed() {
        let state = store_with(None, None).load();
        assert_eq!(state.conversations(), seed_conversations().as_slice());
        assert_eq!(state.active_id(), ConversationId::from_raw(1));
    }

    #[test]
    fn malformed_json_loads_seed_unchanged() {
        let state = store_with(Some("[{\"id\": 1,"), Some("2")).load();
        assert_eq!(state.conversations(), seed_conversations().as_slice());
        assert_eq!(state.active_id(), ConversationId::from_raw(2));
    }

    #[test]
    fn conversation_without_messages_loads_seed() {
        let raw = r#"[{"id":5,"title":"New Conversation","messages":[]}]"#;
        let state = store_with(Some(raw), Some("5")).load();
        assert_eq!(state.conversations(), seed_conversations().as_slice());
        assert_eq!(state.active_id(), ConversationId::from_raw(1));
    }

    #[test]
    fn repeated_ids_load_seed() {
        let one = Conversation::with_id(ConversationId::from_raw(1), None);
        let raw = serde_json::to_string(&[one.clone(), one]).unwrap();
        let state = store_with(Some(raw.as_str()), None).load();
        assert_eq!(state.conversations(), seed_conversations().as_slice());
    }

    #[test]
    fn unparseable_active_id_defaults_to_first() {
        let state = store_with(None, Some("not-a-number")).load();
        assert_eq!(state.active_id(), ConversationId::from_raw(1));
    }

    #[test]
    fn dangling_active_id_defaults_to_first() {
        let state = store_with(None, Some("99")).load();
        assert_eq!(state.active_id(), ConversationId::from_raw(1));
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = store_with(None, None);
        let mut state = store.load();
        state
            .update(ConversationId::from_raw(2), |c| {
                c.append_message(Message::user("Hi"))
                    .append_message(Message::error("timeout"))
                    .adopt_session("s1")
            })
            .unwrap();
        state.insert_front(Conversation::new(Some("s2".into())));
        store.save(&state).unwrap();

        let reloaded = store.load();
        assert_eq!(reloaded, state);
        store.save(&reloaded).unwrap();
        assert_eq!(store.load(), reloaded);
    }

    #[test]
    fn persisted_shape_uses_camel_case_keys() {
        let mut store = store_with(None, None);
        let state = store.load();
        store.save(&state).unwrap();
        let raw = store.backend().get(CONVERSATIONS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["lastMessage"], "How can I explain neural networks to beginners?");
        assert!(value[0].get("sessionId").is_none());
        assert_eq!(store.backend().get(ACTIVE_ID_KEY).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn file_backed_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("storage.json");
        let mut store = ConversationStore::new(FileKeyValueStore::open(&path).unwrap());
        let mut state = store.load();
        state.select(ConversationId::from_raw(2)).unwrap();
        store.save(&state).unwrap();

        let reopened = ConversationStore::new(FileKeyValueStore::open(&path).unwrap());
        assert_eq!(reopened.load(), state);
    }
}
