use chrono::Local;
use serde::{Deserialize, Serialize};

use super::id::{ConversationId, MessageId};
use super::message::{display_string, Message, Sender};

pub const DEFAULT_TITLE: &str = "New Conversation";
pub const GREETING: &str = "Hello! I'm your Bedrock AI Agent. How can I help you today?";
const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    #[serde(default)]
    pub last_message: String,
    #[serde(default, deserialize_with = "display_string")]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(session_id: Option<String>) -> Self {
        Self::with_id(ConversationId::new(), session_id)
    }

    pub fn with_id(id: ConversationId, session_id: Option<String>) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            last_message: String::new(),
            timestamp: display_now(),
            session_id,
            messages: vec![Message::ai(GREETING).with_id(MessageId::GREETING)],
        }
    }

    /// Appends `message` and refreshes the summary fields.
    ///
    /// The first user message of a conversation (the one arriving while only
    /// the greeting is present) also becomes its title.
    pub fn append_message(mut self, message: Message) -> Self {
        if message.sender == Sender::User && self.messages.len() == 1 {
            self.title = truncate_title(&message.text);
        }
        self.last_message = message.text.clone();
        self.timestamp = display_now();
        self.messages.push(message);
        self
    }

    /// Records the agent session handle. An existing handle is kept.
    pub fn adopt_session(mut self, session_id: &str) -> Self {
        if self.session_id.is_none() && !session_id.is_empty() {
            self.session_id = Some(session_id.to_string());
        }
        self
    }

    pub fn last_reply(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.sender == Sender::Ai && !msg.is_error)
    }
}

fn display_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

fn truncate_title(text: &str) -> String {
    let mut chars = text.chars();
    let mut title = chars.by_ref().take(TITLE_MAX_CHARS).collect::<String>();
    if chars.next().is_some() {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("Hi", "Hi")]
    #[case(&"a".repeat(50), &"a".repeat(50))]
    #[case(&"a".repeat(51), &format!("{}...", "a".repeat(50)))]
    #[case(&"é".repeat(60), &format!("{}...", "é".repeat(50)))]
    fn title_is_truncated_to_fifty_chars(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(truncate_title(text), expected);
    }

    #[test]
    fn new_conversation_starts_with_greeting() {
        let conv = Conversation::new(Some("s1".into()));
        assert_eq!(conv.title, DEFAULT_TITLE);
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].sender, Sender::Ai);
        assert_eq!(conv.messages[0].text, GREETING);
        assert_eq!(conv.session_id.as_deref(), Some("s1"));
    }

    #[test]
    fn second_user_message_keeps_title() {
        let conv = Conversation::new(None)
            .append_message(Message::user("first question"))
            .append_message(Message::ai("answer"))
            .append_message(Message::user("follow up"));
        assert_eq!(conv.title, "first question");
        assert_eq!(conv.last_message, "follow up");
    }

    #[test]
    fn ai_message_first_does_not_rename() {
        let conv = Conversation::new(None).append_message(Message::ai("unprompted"));
        assert_eq!(conv.title, DEFAULT_TITLE);
        let conv = conv.append_message(Message::user("now me"));
        assert_eq!(conv.title, DEFAULT_TITLE);
    }

    #[test]
    fn session_is_not_rotated() {
        let conv = Conversation::new(None).adopt_session("s1").adopt_session("s2");
        assert_eq!(conv.session_id.as_deref(), Some("s1"));
        let conv = Conversation::new(None).adopt_session("");
        assert_eq!(conv.session_id, None);
    }

    #[test]
    fn last_reply_skips_error_messages() {
        let conv = Conversation::new(None)
            .append_message(Message::user("q"))
            .append_message(Message::ai("a"))
            .append_message(Message::user("q2"))
            .append_message(Message::error("timeout"));
        assert_eq!(conv.last_reply().map(|m| m.text.as_str()), Some("a"));
    }

    fn arb_message() -> impl Strategy<Value = Message> {
        (any::<bool>(), "[a-z ]{1,80}").prop_map(|(from_user, text)| {
            if from_user {
                Message::user(text)
            } else {
                Message::ai(text)
            }
        })
    }

    proptest! {
        #[test]
        fn append_only_and_title_set_once(messages in prop::collection::vec(arb_message(), 1..20)) {
            let mut conv = Conversation::new(None);
            let mut renamed_with: Option<String> = None;
            for message in messages {
                let before = conv.messages.clone();
                let first_user = message.sender == Sender::User && before.len() == 1;
                conv = conv.append_message(message.clone());
                prop_assert_eq!(conv.messages.len(), before.len() + 1);
                prop_assert_eq!(&conv.messages[..before.len()], &before[..]);
                prop_assert_eq!(conv.messages.last(), Some(&message));
                if first_user {
                    renamed_with = Some(truncate_title(&message.text));
                }
            }
            let expected = renamed_with.unwrap_or_else(|| DEFAULT_TITLE.to_string());
            prop_assert_eq!(conv.title, expected);
        }
    }
}
