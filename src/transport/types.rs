use serde::{Deserialize, Serialize};

/// A reply from the agent, with the session it belongs to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AgentReply {
    pub message: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionHandle {
    pub session_id: String,
}

#[derive(Serialize)]
pub(super) struct AgentChatRequest<'a> {
    pub message: &'a str,
    pub session_id: Option<&'a str>,
}

/// Either the service's `{success, data}` envelope or a bare payload.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(super) enum Envelope<T> {
    Wrapped {
        data: Option<T>,
        #[serde(default)]
        error: Option<String>,
        #[allow(dead_code)]
        success: bool,
    },
    Bare(T),
}

impl<T> Envelope<T> {
    pub(super) fn into_payload(self) -> (Option<T>, Option<String>) {
        match self {
            Envelope::Wrapped { data, error, .. } => (data, error),
            Envelope::Bare(payload) => (Some(payload), None),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub(super) struct ChatPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub(super) struct SessionPayload {
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Deserialize, Debug)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> (Option<ChatPayload>, Option<String>) {
        serde_json::from_str::<Envelope<ChatPayload>>(raw)
            .unwrap()
            .into_payload()
    }

    #[test]
    fn failure_envelope_without_data() {
        let (data, error) = decode(r#"{"success":false,"error":"Agent not configured"}"#);
        assert!(data.is_none());
        assert_eq!(error.as_deref(), Some("Agent not configured"));
    }

    #[test]
    fn success_envelope_unwraps_data() {
        let (data, error) =
            decode(r#"{"success":true,"data":{"message":"Hello back","session_id":"s1"}}"#);
        let data = data.unwrap();
        assert_eq!(data.message.as_deref(), Some("Hello back"));
        assert_eq!(data.session_id.as_deref(), Some("s1"));
        assert!(error.is_none());
    }

    #[test]
    fn bare_payload_accepts_camel_case_session() {
        let (data, _) = decode(r#"{"message":"hi","sessionId":"s2"}"#);
        assert_eq!(data.unwrap().session_id.as_deref(), Some("s2"));
    }
}
