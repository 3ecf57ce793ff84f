use std::io::{self, Read};

use anyhow::{anyhow, bail};

use agent_chat::speech::should_auto_speak;

use crate::args::CliArgs;

use super::setup::Controller;

pub(super) async fn run_non_interactive(
    args: &CliArgs,
    mut controller: Controller,
) -> anyhow::Result<()> {
    let prompt = resolve_prompt(args)?;
    let reply = controller
        .send(&prompt)
        .await?
        .ok_or_else(|| anyhow!("nothing to send: the prompt is empty"))?;
    if reply.is_error {
        bail!("{}", reply.text);
    }
    println!("{}", reply.text);

    if args.speak && should_auto_speak(&reply.text) {
        if let Some(player) = controller.speech() {
            let outcome = player.speak(&reply.text).await;
            log::debug!("speech outcome: {outcome:?}");
        }
    }
    Ok(())
}

fn resolve_prompt(args: &CliArgs) -> anyhow::Result<String> {
    if let Some(prompt) = &args.prompt {
        return Ok(prompt.clone());
    }
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}
