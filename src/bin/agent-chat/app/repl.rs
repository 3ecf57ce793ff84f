use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use agent_chat::controller::{AppEvent, PendingSend, SubmitOutcome};
use agent_chat::transport::{AgentReply, AgentTransport, TransportError};

use super::commands::{resolve_target, suggestion, Command};
use super::render;
use super::setup::Controller;

const EVENT_BUFFER: usize = 32;

pub(super) async fn run_repl(controller: Controller) -> anyhow::Result<()> {
    let (events, rx) = mpsc::channel(EVENT_BUFFER);
    let mut repl = Repl {
        controller,
        events,
        rx,
        should_quit: false,
    };
    repl.run().await
}

struct Repl {
    controller: Controller,
    events: mpsc::Sender<AppEvent>,
    rx: mpsc::Receiver<AppEvent>,
    should_quit: bool,
}

impl Repl {
    async fn run(&mut self) -> anyhow::Result<()> {
        render::banner(self.controller.transport().config().base_url.as_str());
        if let Some(conv) = self.controller.active() {
            render::conversation(conv);
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        render::prompt();
        while !self.should_quit {
            let event = tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => AppEvent::Input(line),
                    None => AppEvent::InputClosed,
                },
                Some(event) = self.rx.recv() => event,
            };
            self.handle_event(event).await;
            if !self.should_quit {
                render::prompt();
            }
        }
        log::info!("leaving chat");
        Ok(())
    }

    async fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(line) => self.handle_command(Command::parse(&line)).await,
            AppEvent::InputClosed => {
                println!();
                self.should_quit = true;
            }
            AppEvent::Reply { pending, result } => {
                println!();
                self.handle_reply(pending, result);
            }
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Message(text) => self.send(&text, false),
            Command::New => {
                self.controller.new_conversation().await;
                self.show_active();
            }
            Command::List => render::conversation_list(
                self.controller.conversations(),
                self.controller.state().active_id(),
            ),
            Command::Switch(target) => {
                let selected = resolve_target(self.controller.state(), &target)
                    .map(|id| self.controller.select(id));
                match selected {
                    Some(Ok(())) => self.show_active(),
                    _ => render::warning(&format!("no conversation {target}")),
                }
            }
            Command::Delete(target) => self.delete(target).await,
            Command::History => self.show_active(),
            Command::Suggest(None) => render::suggestions(),
            Command::Suggest(Some(n)) => match suggestion(n) {
                Some(question) => self.send(question, true),
                None => render::warning(&format!("no suggestion {n}")),
            },
            Command::Voice => self.toggle_voice(),
            Command::Say => self.say(),
            Command::Health => match self.controller.transport().health().await {
                Ok(()) => render::info("agent service is healthy"),
                Err(err) => render::warning(&format!("agent service unavailable: {err}")),
            },
            Command::Help => render::help(),
            Command::Quit => self.should_quit = true,
            Command::Unknown(raw) => {
                render::warning(&format!("unknown command {raw}, /help lists commands"))
            }
        }
    }

    fn send(&mut self, text: &str, echo: bool) {
        match self.controller.submit(Some(text)) {
            Ok(SubmitOutcome::Pending(pending)) => {
                if echo {
                    if let Some(msg) = self.controller.active().and_then(|c| c.messages.last()) {
                        render::message(msg);
                    }
                }
                render::info("waiting for the agent...");
                self.controller.dispatch(pending, self.events.clone());
            }
            Ok(SubmitOutcome::Busy(_)) => {
                render::warning("still waiting for the previous reply in this conversation")
            }
            Ok(SubmitOutcome::Rejected(_)) => {}
            Err(err) => render::warning(&err.to_string()),
        }
    }

    fn handle_reply(&mut self, pending: PendingSend, result: Result<AgentReply, TransportError>) {
        let conversation_id = pending.conversation_id;
        let active = self.controller.state().active_id();
        match self.controller.complete(pending, result) {
            Some(msg) if conversation_id == active => render::message(&msg),
            Some(_) => {
                let title = self
                    .controller
                    .state()
                    .get(conversation_id)
                    .map(|c| c.title.clone())
                    .unwrap_or_default();
                render::info(&format!("new reply in \"{title}\" (/list, /switch to read it)"));
            }
            None => render::info("a reply arrived for a deleted conversation and was discarded"),
        }
    }

    async fn delete(&mut self, target: Option<String>) {
        let id = match target.as_deref() {
            Some(raw) => match resolve_target(self.controller.state(), raw) {
                Some(id) => id,
                None => return render::warning(&format!("no conversation {raw}")),
            },
            None => self.controller.state().active_id(),
        };
        let previous_active = self.controller.state().active_id();
        match self.controller.delete_conversation(id).await {
            Ok(_) => {
                render::info("conversation deleted");
                if self.controller.state().active_id() != previous_active {
                    self.show_active();
                }
            }
            Err(err) => render::warning(&err.to_string()),
        }
    }

    fn toggle_voice(&mut self) {
        if self.controller.speech().is_none() {
            return render::warning("speech is disabled, see [speech] in the config");
        }
        let enabled = !self.controller.auto_speak();
        self.controller.set_auto_speak(enabled);
        render::info(if enabled {
            "replies will be read aloud"
        } else {
            "replies will not be read aloud"
        });
    }

    fn say(&self) {
        let Some(player) = self.controller.speech() else {
            return render::warning("speech is disabled, see [speech] in the config");
        };
        match self.controller.active().and_then(|c| c.last_reply()) {
            Some(reply) => {
                player.speak_detached(reply.text.clone());
            }
            None => render::warning("nothing to read yet"),
        }
    }

    fn show_active(&self) {
        if let Some(conv) = self.controller.active() {
            render::conversation(conv);
        }
    }
}
