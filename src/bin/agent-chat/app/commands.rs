use agent_chat::conversation::{ChatState, ConversationId};

/// Questions offered to get a conversation going.
pub(super) const SUGGESTED_QUESTIONS: [&str; 4] = [
    "How can I explain neural networks to beginners?",
    "What are the key IoT vocabulary terms students should know?",
    "Help me create a lesson plan about semiconductor technology",
    "How to teach technical writing for AI documentation?",
];

pub(super) const HELP: &str = "\
/new              start a new conversation
/list             list conversations
/switch <n|#id>   switch to conversation n in /list, or by id
/delete [n|#id]   delete a conversation, or the current one
/history          show the current conversation
/suggest [n]      show suggested questions, or ask question n
/voice            toggle reading replies aloud
/say              read the last reply aloud
/health           check the agent service
/help             show this help
/quit             exit";

/// A line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Command {
    New,
    List,
    Switch(String),
    Delete(Option<String>),
    History,
    Suggest(Option<usize>),
    Voice,
    Say,
    Health,
    Help,
    Quit,
    Unknown(String),
    /// Anything that is not a slash command.
    Message(String),
}

impl Command {
    pub(super) fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Message(line.to_string());
        };
        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(str::to_string);
        match (name.as_str(), arg) {
            ("new", _) => Command::New,
            ("list" | "ls", _) => Command::List,
            ("switch" | "open", Some(target)) => Command::Switch(target),
            ("delete" | "rm", target) => Command::Delete(target),
            ("history", _) => Command::History,
            ("suggest", None) => Command::Suggest(None),
            ("suggest", Some(n)) => match n.parse() {
                Ok(n) => Command::Suggest(Some(n)),
                Err(_) => Command::Unknown(trimmed.to_string()),
            },
            ("voice", _) => Command::Voice,
            ("say", _) => Command::Say,
            ("health", _) => Command::Health,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", _) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// Picks a suggested question by its 1-based number.
pub(super) fn suggestion(n: usize) -> Option<&'static str> {
    n.checked_sub(1)
        .and_then(|index| SUGGESTED_QUESTIONS.get(index))
        .copied()
}

/// Resolves a `/switch` or `/delete` target: `#<id>` names a conversation
/// id, a bare number is a 1-based position in the list.
pub(super) fn resolve_target(state: &ChatState, raw: &str) -> Option<ConversationId> {
    let raw = raw.trim();
    if let Some(id) = raw.strip_prefix('#') {
        let id = id.parse::<ConversationId>().ok()?;
        return state.contains(id).then_some(id);
    }
    raw.parse::<usize>()
        .ok()?
        .checked_sub(1)
        .and_then(|index| state.conversations().get(index))
        .map(|conv| conv.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_chat::conversation::Conversation;
    use rstest::rstest;

    fn state_with_ids(ids: &[i64]) -> ChatState {
        let conversations: Vec<_> = ids
            .iter()
            .map(|&raw| Conversation::with_id(ConversationId::from_raw(raw), None))
            .collect();
        let active = conversations[0].id;
        ChatState::new(conversations, active).unwrap()
    }

    #[rstest]
    #[case("/new", Command::New)]
    #[case("  /LIST ", Command::List)]
    #[case("/switch 2", Command::Switch("2".into()))]
    #[case("/switch", Command::Unknown("/switch".into()))]
    #[case("/delete", Command::Delete(None))]
    #[case("/delete  1705329000000", Command::Delete(Some("1705329000000".into())))]
    #[case("/suggest", Command::Suggest(None))]
    #[case("/suggest 3", Command::Suggest(Some(3)))]
    #[case("/suggest x", Command::Unknown("/suggest x".into()))]
    #[case("/quit", Command::Quit)]
    #[case("/frobnicate", Command::Unknown("/frobnicate".into()))]
    fn parses_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::parse(line), expected);
    }

    #[test]
    fn plain_text_is_sent_verbatim() {
        assert_eq!(
            Command::parse("  what is IoT?  "),
            Command::Message("  what is IoT?  ".into())
        );
    }

    #[test]
    fn suggestions_are_one_based() {
        assert_eq!(suggestion(0), None);
        assert_eq!(suggestion(1), Some(SUGGESTED_QUESTIONS[0]));
        assert_eq!(suggestion(4), Some(SUGGESTED_QUESTIONS[3]));
        assert_eq!(suggestion(5), None);
    }

    #[test]
    fn bare_numbers_are_list_positions() {
        let state = state_with_ids(&[1_705_329_000_000, 1, 2]);
        assert_eq!(resolve_target(&state, "1"), Some(ConversationId::from_raw(1_705_329_000_000)));
        assert_eq!(resolve_target(&state, " 3 "), Some(ConversationId::from_raw(2)));
        assert_eq!(resolve_target(&state, "0"), None);
        assert_eq!(resolve_target(&state, "4"), None);
    }

    #[test]
    fn hash_prefix_selects_by_id() {
        let state = state_with_ids(&[1_705_329_000_000, 1, 2]);
        assert_eq!(resolve_target(&state, "#1"), Some(ConversationId::from_raw(1)));
        assert_eq!(
            resolve_target(&state, "#1705329000000"),
            Some(ConversationId::from_raw(1_705_329_000_000))
        );
        assert_eq!(resolve_target(&state, "#3"), None);
        assert_eq!(resolve_target(&state, "#abc"), None);
    }
}
