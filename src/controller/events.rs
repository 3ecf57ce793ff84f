use crate::transport::{AgentReply, TransportError};

use super::PendingSend;

/// Everything the interactive loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A line typed by the user.
    Input(String),
    /// Standard input reached end of file.
    InputClosed,
    /// A dispatched agent call settled.
    Reply {
        pending: PendingSend,
        result: Result<AgentReply, TransportError>,
    },
}
