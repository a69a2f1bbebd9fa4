pub mod general_message;
pub mod message;

use std::sync::Arc;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::bot::commands::Command;
use crate::database::Store;
use crate::services::chat::ChatClient;

/// Error type shared by every endpoint in the dispatch tree.
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Owns the long-lived collaborators and hands clones of them to each update.
#[derive(Clone)]
pub struct BotHandler {
    pub store: Arc<dyn Store>,
    pub chat: Arc<dyn ChatClient>,
}

impl BotHandler {
    pub fn new(store: Arc<dyn Store>, chat: Arc<dyn ChatClient>) -> Self {
        Self { store, chat }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let store = self.store.clone();
        let chat = self.chat.clone();

        // Commands that fail to parse fall through both branches unanswered.
        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let store = store.clone();
                        async move { message::command_handler(bot, msg, cmd, store).await }
                    }),
            )
            .branch(
                dptree::filter(|msg: Message| {
                    msg.text().is_some_and(|text| !general_message::is_command(text))
                })
                .endpoint(move |bot: Bot, msg: Message| {
                    let chat = chat.clone();
                    async move { general_message::handle_general_message(bot, msg, chat).await }
                }),
            )
    }
}
