//! Error types shared by the store client, the chat client and the command handlers.

use thiserror::Error;

/// Failures talking to the remote key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected value at {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to the chat-completion service.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chat service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed chat response: {0}")]
    MalformedResponse(String),
}

/// Anything a handler can fail with once its arguments have been accepted.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Chat(#[from] ChatError),
}
