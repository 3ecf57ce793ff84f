use std::io::{self, Write};

use crossterm::style::Stylize;

use agent_chat::conversation::{Conversation, ConversationId, Message, Sender};

use super::commands::{HELP, SUGGESTED_QUESTIONS};

pub(super) fn banner(base_url: &str) {
    println!("{}", "Agent chat".bold().blue());
    println!("{}", format!("connected to {base_url}, /help for commands").dim());
}

pub(super) fn prompt() {
    print!("{} ", ">".bold().blue());
    let _ = io::stdout().flush();
}

pub(super) fn message(msg: &Message) {
    match msg.sender {
        Sender::User => println!("{} {}", "you   ›".bold().cyan(), msg.text),
        Sender::Ai if msg.is_error => {
            println!("{} {}", "agent ›".bold().red(), msg.text.as_str().red())
        }
        Sender::Ai => println!("{} {}", "agent ›".bold().green(), msg.text),
    }
}

pub(super) fn conversation(conv: &Conversation) {
    let session = conv.session_id.as_deref().unwrap_or("no session yet");
    println!(
        "{} {}",
        conv.title.as_str().bold().underlined(),
        format!("({}, {session})", conv.timestamp).dim()
    );
    for msg in &conv.messages {
        message(msg);
    }
    if conv.messages.len() == 1 {
        suggestions();
    }
}

pub(super) fn conversation_list(conversations: &[Conversation], active: ConversationId) {
    for (index, conv) in conversations.iter().enumerate() {
        let marker = if conv.id == active { "*" } else { " " };
        let line = format!("{marker} {:>2}. {} [#{}]", index + 1, conv.title, conv.id);
        if conv.id == active {
            println!("{}", line.bold());
        } else {
            println!("{line}");
        }
        if !conv.last_message.is_empty() {
            println!("       {}", preview(&conv.last_message).dim());
        }
    }
}

pub(super) fn suggestions() {
    println!("{}", "Try asking me about (/suggest <n>):".dim());
    for (index, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
        println!("  {}. {question}", index + 1);
    }
}

pub(super) fn help() {
    println!("{HELP}");
}

pub(super) fn info(text: &str) {
    println!("{}", text.dim());
}

pub(super) fn warning(text: &str) {
    println!("{}", text.yellow());
}

/// A notice the user has to acknowledge.
pub(super) fn alert(text: &str) {
    eprintln!("{} {}", " ! ".on_red().white().bold(), text.red().bold());
}

fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 60;
    let mut chars = text.chars();
    let mut short: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        short.push('…');
    }
    short.replace('\n', " ")
}
