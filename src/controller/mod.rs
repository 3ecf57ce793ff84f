//! Chat controller tying the conversation state, its persistence, the agent
//! transport and spoken replies together.
//!
//! A send is split in two halves. [`ChatController::submit`] validates the
//! input, appends the user message and returns a [`PendingSend`];
//! [`ChatController::complete`] later appends the agent's answer to the
//! conversation the send came from, whichever conversation is active by then.

mod events;

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::conversation::{
    validate_message, ChatState, Conversation, ConversationId, Message, NextActive, StateError,
    ValidationError,
};
use crate::speech::{should_auto_speak, SpeechPlayer};
use crate::store::{ConversationStore, KeyValueStore};
use crate::transport::{AgentReply, AgentTransport, TransportError};

pub use events::AppEvent;

/// Shown in place of a failure that carries no readable explanation.
pub const APOLOGY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again later.";

/// An agent call that has been accepted but not yet answered.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PendingSend {
    /// Conversation the reply belongs to.
    pub conversation_id: ConversationId,
    /// Text exactly as the user typed it.
    pub text: String,
    /// Session handle at the time of the send.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed.
    Rejected(ValidationError),
    /// A send for this conversation is still in flight.
    Busy(ConversationId),
    /// The user message was appended and the agent should be called.
    Pending(PendingSend),
}

pub struct ChatController<T, S> {
    state: ChatState,
    store: ConversationStore<S>,
    transport: Arc<T>,
    /// Conversations with an unanswered send.
    in_flight: HashSet<ConversationId>,
    speech: Option<Arc<SpeechPlayer>>,
    auto_speak: bool,
}

impl<T, S> ChatController<T, S>
where
    T: AgentTransport + 'static,
    S: KeyValueStore,
{
    /// Loads the stored state (or the seed data) from `store`.
    pub fn new(store: ConversationStore<S>, transport: Arc<T>) -> Self {
        let state = store.load();
        log::debug!(
            "loaded {} conversations, active {}",
            state.conversations().len(),
            state.active_id()
        );
        Self {
            state,
            store,
            transport,
            in_flight: HashSet::new(),
            speech: None,
            auto_speak: false,
        }
    }

    /// Enables spoken replies through `player`.
    #[must_use]
    pub fn with_speech(mut self, player: Arc<SpeechPlayer>, auto_speak: bool) -> Self {
        self.speech = Some(player);
        self.auto_speak = auto_speak;
        self
    }

    pub fn speech(&self) -> Option<&Arc<SpeechPlayer>> {
        self.speech.as_ref()
    }

    pub const fn auto_speak(&self) -> bool {
        self.auto_speak
    }

    pub fn set_auto_speak(&mut self, enabled: bool) {
        self.auto_speak = enabled;
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub const fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn store(&self) -> &ConversationStore<S> {
        &self.store
    }

    pub fn conversations(&self) -> &[Conversation] {
        self.state.conversations()
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.state.active()
    }

    pub fn is_busy(&self, id: ConversationId) -> bool {
        self.in_flight.contains(&id)
    }

    /// Accepts user input for the active conversation.
    pub fn submit(&mut self, input: Option<&str>) -> Result<SubmitOutcome, StateError> {
        let text = match validate_message(input) {
            Ok(text) => text,
            Err(err) => return Ok(SubmitOutcome::Rejected(err)),
        };
        let conversation_id = self.state.active_id();
        if self.in_flight.contains(&conversation_id) {
            log::debug!("conversation {conversation_id} already has a send in flight");
            return Ok(SubmitOutcome::Busy(conversation_id));
        }

        let updated = self
            .state
            .update(conversation_id, |c| c.append_message(Message::user(text.clone())))?;
        let session_id = updated.session_id.clone();
        self.in_flight.insert(conversation_id);
        self.persist();

        Ok(SubmitOutcome::Pending(PendingSend {
            conversation_id,
            text,
            session_id,
        }))
    }

    /// Records the outcome of a send in the conversation it came from.
    ///
    /// Returns the appended message, or `None` when that conversation was
    /// deleted in the meantime.
    pub fn complete(
        &mut self,
        pending: PendingSend,
        result: Result<AgentReply, TransportError>,
    ) -> Option<Message> {
        let conversation_id = pending.conversation_id;
        self.in_flight.remove(&conversation_id);

        let (message, session_id) = match result {
            Ok(reply) => (Message::ai(reply.message), Some(reply.session_id)),
            Err(err) => {
                log::warn!("agent call for conversation {conversation_id} failed: {err}");
                let text = err.message();
                let text = if text.trim().is_empty() {
                    APOLOGY.to_string()
                } else {
                    text
                };
                (Message::error(text), None)
            }
        };

        let appended = message.clone();
        let updated = self.state.update(conversation_id, move |c| {
            let c = c.append_message(appended);
            match session_id.as_deref() {
                Some(session_id) => c.adopt_session(session_id),
                None => c,
            }
        });
        if let Err(err) = updated {
            log::warn!("dropping reply: {err}");
            return None;
        }
        self.persist();

        if !message.is_error && self.auto_speak && should_auto_speak(&message.text) {
            if let Some(player) = &self.speech {
                player.speak_detached(message.text.clone());
            }
        }
        Some(message)
    }

    /// Submits `text` and waits for the agent's answer.
    pub async fn send(&mut self, text: &str) -> Result<Option<Message>, StateError> {
        match self.submit(Some(text))? {
            SubmitOutcome::Pending(pending) => {
                let result = self
                    .transport
                    .send_message(&pending.text, pending.session_id.as_deref())
                    .await;
                Ok(self.complete(pending, result))
            }
            SubmitOutcome::Rejected(_) | SubmitOutcome::Busy(_) => Ok(None),
        }
    }

    /// Calls the agent in the background and posts the result to `events`.
    pub fn dispatch(&self, pending: PendingSend, events: mpsc::Sender<AppEvent>) -> JoinHandle<()> {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            let result = transport
                .send_message(&pending.text, pending.session_id.as_deref())
                .await;
            if events.send(AppEvent::Reply { pending, result }).await.is_err() {
                log::warn!("event loop closed before the agent replied");
            }
        })
    }

    /// Starts a conversation at the top of the list and selects it.
    ///
    /// A session is requested up front; without one the first send opens it.
    pub async fn new_conversation(&mut self) -> ConversationId {
        let session_id = match self.transport.create_session().await {
            Ok(handle) if !handle.session_id.is_empty() => Some(handle.session_id),
            Ok(_) => None,
            Err(err) => {
                log::warn!("could not create agent session: {err}");
                None
            }
        };
        let conversation = Conversation::new(session_id);
        let id = conversation.id;
        self.state.insert_front(conversation);
        self.persist();
        log::info!("started conversation {id}");
        id
    }

    /// Deletes a conversation, replacing it with a fresh one if it was the last.
    pub async fn delete_conversation(
        &mut self,
        id: ConversationId,
    ) -> Result<NextActive, StateError> {
        let next = self.state.delete(id)?;
        self.in_flight.remove(&id);
        if next == NextActive::CreateNew {
            self.new_conversation().await;
        } else {
            self.persist();
        }
        Ok(next)
    }

    pub fn select(&mut self, id: ConversationId) -> Result<(), StateError> {
        self.state.select(id)?;
        self.persist();
        Ok(())
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.state) {
            log::error!("failed to save conversations: {err}");
        }
    }
}
