use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;

use crate::bot::handlers::message::error_reply;
use crate::bot::handlers::HandlerResult;
use crate::error::HandlerError;
use crate::services::chat::ChatClient;

/// True for text the command filter owns, including unknown commands.
pub fn is_command(text: &str) -> bool {
    text.starts_with('/')
}

/// Forwards free text to the chat client and relays the answer unchanged.
pub async fn handle_general_message(
    bot: Bot,
    msg: Message,
    chat: Arc<dyn ChatClient>,
) -> HandlerResult {
    let text = msg.text().unwrap_or_default();

    info!("Update: {:?}", msg);
    info!("Context: chat_id={} from={:?}", msg.chat.id, msg.from());

    let reply = converse(chat.as_ref(), text).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

pub async fn converse(chat: &dyn ChatClient, text: &str) -> String {
    match chat.submit(text).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Chat completion failed: {}", e);
            error_reply(&HandlerError::from(e))
        }
    }
}
