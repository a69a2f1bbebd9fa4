use std::sync::Arc;
use teloxide::prelude::*;

use crate::bot::commands::{greeting, keywords, matching, Command};
use crate::bot::handlers::HandlerResult;
use crate::database::Store;
use crate::error::HandlerError;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    store: Arc<dyn Store>,
) -> HandlerResult {
    let (user, user_id) = msg
        .from()
        .map(|u| (u.full_name(), u.id.0))
        .unwrap_or_else(|| ("unknown".to_string(), 0));
    let chat_id = msg.chat.id.0;
    let name = cmd.name();

    log_command_start(name, &user, user_id, chat_id, Some(cmd.args()));

    let reply = match execute(cmd, store.as_ref()).await {
        Ok(reply) => {
            log_command_success(name, &user, user_id, chat_id, None);
            reply
        }
        Err(e) => {
            log_command_error(name, &user, user_id, chat_id, &e.to_string());
            error_reply(&e)
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Runs one command against the store and returns the text to send back.
pub async fn execute(cmd: Command, store: &dyn Store) -> Result<String, HandlerError> {
    match cmd {
        Command::Help => Ok(greeting::handle_help()),
        Command::Hello(args) => Ok(greeting::handle_hello(&args)),
        Command::Add(args) => keywords::handle_add(store, &args).await,
        Command::Set(args) => keywords::handle_set(store, &args).await,
        Command::Get(args) => keywords::handle_get(store, &args).await,
        Command::Delete(args) => keywords::handle_delete(store, &args).await,
        Command::FindMatches(args) => matching::handle_find_matches(store, &args).await,
    }
}

/// The single reply used for every failure that reaches the router.
pub fn error_reply(error: &HandlerError) -> String {
    format!("Sorry, something went wrong: {error}")
}
