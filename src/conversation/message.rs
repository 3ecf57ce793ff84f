use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::MessageId;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    /// Opaque display string. Values reloaded from storage are never parsed.
    #[serde(default, deserialize_with = "display_string")]
    pub timestamp: String,
    /// Set on the synthetic reply produced when the agent call fails.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            text: text.into(),
            sender,
            timestamp: now_stamp(),
            is_error: false,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::new(Sender::Ai, text)
        }
    }

    pub fn with_id(mut self, id: MessageId) -> Self {
        self.id = id;
        self
    }
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Accepts a string, a number or null and keeps it as display text.
pub(crate) fn display_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_flag_is_omitted_unless_set() {
        let plain = serde_json::to_value(Message::ai("hi")).unwrap();
        assert!(plain.get("isError").is_none());
        assert_eq!(plain["sender"], "ai");

        let failed = serde_json::to_value(Message::error("timeout")).unwrap();
        assert_eq!(failed["isError"], true);
    }

    #[test]
    fn numeric_timestamps_are_kept_as_text() {
        let msg: Message = serde_json::from_value(json!({
            "id": 7,
            "text": "hello",
            "sender": "user",
            "timestamp": 1705329000000i64
        }))
        .unwrap();
        assert_eq!(msg.timestamp, "1705329000000");
        assert!(!msg.is_error);
        assert_eq!(msg.id, MessageId::from_raw(7));
    }
}
