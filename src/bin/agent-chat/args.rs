use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "agent-chat",
    about = "Terminal chat client for a hosted conversational agent"
)]
pub struct CliArgs {
    /// Config file (default: ~/.config/agent-chat/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Agent service root, overriding `agent.base_url`
    #[arg(long)]
    pub base_url: Option<String>,
    /// Send one message, print the reply and exit
    #[arg(long, short = 'p')]
    pub prompt: Option<String>,
    /// Keep conversations in memory only
    #[arg(long)]
    pub ephemeral: bool,
    /// Read replies aloud as they arrive
    #[arg(long, conflicts_with = "no_speech")]
    pub speak: bool,
    /// Disable text-to-speech entirely
    #[arg(long)]
    pub no_speech: bool,
}
