use super::context::ConsoleContext;
use aide_application::ChatSimulator;
use anyhow::Result;

/// Sends each message in turn and prints the simulated replies.
pub async fn run(context: &ConsoleContext, messages: &[String]) -> Result<()> {
    let chat = ChatSimulator::new(&context.config.delays);

    for message in messages {
        if message.trim().is_empty() {
            continue;
        }
        println!("you> {}", message.trim());
        if let Some(reply) = chat.send(message).await {
            println!("assistant> {}", reply.content);
        }
    }

    Ok(())
}
