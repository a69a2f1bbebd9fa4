use tracing::{debug, error, info};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: u64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_START: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, user_id: u64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: &str, user_id: u64, chat_id: i64, error: &str) {
    error!(
        "CMD_ERROR: {} by {}({}) in chat {} - {}",
        command, user, user_id, chat_id, error
    );
}

/// Logs store round trips with consistent format
pub fn log_store_operation(operation: &str, path: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("STORE_OP: {} on /{} - {}", operation, path, d),
        None => debug!("STORE_OP: {} on /{}", operation, path),
    }
}

/// Logs store errors with consistent format
pub fn log_store_error(operation: &str, path: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("STORE_ERROR: {} on /{} failed: {} - {}", operation, path, error, d),
        None => error!("STORE_ERROR: {} on /{} failed: {}", operation, path, error),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}

/// Masks a secret for logging: first 7 chars + "***" + last 4 chars, or just
/// "***" when the secret is too short to reveal anything.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}***{tail}")
}
