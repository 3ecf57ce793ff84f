#[path = "agent-chat/app/mod.rs"]
mod app;
#[path = "agent-chat/args.rs"]
mod args;
#[path = "agent-chat/config/mod.rs"]
mod config;
#[path = "agent-chat/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
