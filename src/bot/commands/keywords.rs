use crate::database::models::Keyword;
use crate::database::Store;
use crate::error::HandlerError;
use crate::utils::validation::{parse_int_value, split_args, validate_key};

pub const ADD_USAGE: &str = "Usage: /add <keyword>";
pub const SET_USAGE: &str = "Usage: /set <key> <value>";
pub const GET_USAGE: &str = "Usage: /get <key>";
pub const DELETE_USAGE: &str = "Usage: /delete <key>";

/// First argument as a usable key, or the reply to send instead.
fn key_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, String> {
    let key = args.first().copied().ok_or_else(|| usage.to_string())?;
    validate_key(key).map_err(|e| format!("{e}. {usage}"))?;
    Ok(key)
}

pub async fn handle_add(store: &dyn Store, args: &str) -> Result<String, HandlerError> {
    let args = split_args(args);
    let key = match key_arg(&args, ADD_USAGE) {
        Ok(key) => key,
        Err(reply) => return Ok(reply),
    };

    let keyword = Keyword::increment(store, key).await?;
    Ok(format!("You have said {} for {} times.", keyword.key, keyword.count))
}

pub async fn handle_set(store: &dyn Store, args: &str) -> Result<String, HandlerError> {
    let args = split_args(args);
    let key = match key_arg(&args, SET_USAGE) {
        Ok(key) => key,
        Err(reply) => return Ok(reply),
    };
    let value = match parse_int_value(&args[1..]) {
        Ok(value) => value,
        Err(_) => return Ok(SET_USAGE.to_string()),
    };

    let keyword = Keyword::set(store, key, value).await?;
    Ok(format!("Set {} to {}.", keyword.key, keyword.count))
}

pub async fn handle_get(store: &dyn Store, args: &str) -> Result<String, HandlerError> {
    let args = split_args(args);
    let key = match key_arg(&args, GET_USAGE) {
        Ok(key) => key,
        Err(reply) => return Ok(reply),
    };

    // A stored 0 is still a value.
    Ok(match Keyword::find_by_key(store, key).await? {
        Some(keyword) => format!("The value for {} is {}.", keyword.key, keyword.count),
        None => format!("{key} does not exist."),
    })
}

pub async fn handle_delete(store: &dyn Store, args: &str) -> Result<String, HandlerError> {
    let args = split_args(args);
    let key = match key_arg(&args, DELETE_USAGE) {
        Ok(key) => key,
        Err(reply) => return Ok(reply),
    };

    if store.get(&Keyword::path(key)).await?.is_none() {
        return Ok(format!("{key} does not exist."));
    }

    match Keyword::delete(store, key).await {
        Ok(()) => Ok(format!("Deleted {key}.")),
        Err(e) => {
            tracing::error!("Failed to delete keyword {}: {}", key, e);
            Ok(format!("Error deleting {key}: {e}"))
        }
    }
}
