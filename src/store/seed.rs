use crate::conversation::{Conversation, ConversationId, Message, MessageId, GREETING};

const SEED_MESSAGE_STAMP: &str = "2024-01-15T14:30:00.000Z";

fn seeded(id: i64, title: &str, last_message: &str, timestamp: &str) -> Conversation {
    Conversation {
        title: title.to_string(),
        last_message: last_message.to_string(),
        timestamp: timestamp.to_string(),
        ..Conversation::with_id(ConversationId::from_raw(id), None)
    }
}

fn stamped(message: Message, id: i64) -> Message {
    Message {
        timestamp: SEED_MESSAGE_STAMP.to_string(),
        ..message.with_id(MessageId::from_raw(id))
    }
}

/// The sample conversations shown before anything has been stored.
pub fn seed_conversations() -> Vec<Conversation> {
    let question = "How can I explain neural networks to beginners?";
    let mut vocabulary = seeded(1, "AI Vocabulary Discussion", question, "2024-01-15 14:30");
    vocabulary.messages = vec![
        stamped(Message::ai(GREETING), 1),
        stamped(Message::user(question), 2),
    ];

    let mut iot = seeded(
        2,
        "IoT Teaching Methods",
        "What are the key IoT vocabulary terms students should know?",
        "2024-01-14 16:45",
    );
    iot.messages = vec![stamped(Message::ai(GREETING), 1)];

    vec![vocabulary, iot]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_stable() {
        let first = seed_conversations();
        assert_eq!(first, seed_conversations());
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id, ConversationId::from_raw(1));
        assert_eq!(first[0].messages.len(), 2);
        assert_eq!(first[1].messages.len(), 1);
        assert!(first.iter().all(|c| c.session_id.is_none()));
    }

    #[test]
    fn seed_greeting_matches_stored_browser_data() {
        let seed = seed_conversations();
        for conv in &seed {
            assert_eq!(
                conv.messages[0].text,
                "Hello! I'm your Bedrock AI Agent. How can I help you today?"
            );
        }
    }
}
