use async_trait::async_trait;
use keyword_chatbot::bot::commands::Command;
use keyword_chatbot::bot::handlers::general_message::converse;
use keyword_chatbot::bot::handlers::message::{error_reply, execute};
use keyword_chatbot::bot::handlers::BotHandler;
use keyword_chatbot::database::{MemoryStore, Store};
use keyword_chatbot::error::{ChatError, StoreError};
use keyword_chatbot::services::chat::ChatClient;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use teloxide::utils::command::BotCommands;

/// Wraps a MemoryStore and fails the operations it is told to fail.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_reads: bool,
    fail_writes: bool,
    fail_deletes: bool,
}

fn outage() -> StoreError {
    StoreError::Status {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

#[async_trait]
impl Store for FlakyStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        if self.fail_reads {
            return Err(outage());
        }
        self.inner.get(path).await
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(outage());
        }
        self.inner.set(path, value).await
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        if self.fail_deletes {
            return Err(outage());
        }
        self.inner.delete(path).await
    }

    async fn increment(&self, path: &str, delta: i64) -> Result<i64, StoreError> {
        if self.fail_writes {
            return Err(outage());
        }
        self.inner.increment(path, delta).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Records prompts and answers with a canned reply or a failure.
struct StubChat {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StubChat {
    fn answering(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatClient for StubChat {
    async fn submit(&self, prompt: &str) -> Result<String, ChatError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or_else(|| ChatError::Status {
            status: 500,
            body: "model overloaded".to_string(),
        })
    }
}

async fn run(store: &dyn Store, text: &str) -> String {
    let cmd = Command::parse(text, "testbot").unwrap();
    match execute(cmd, store).await {
        Ok(reply) => reply,
        Err(e) => error_reply(&e),
    }
}

#[tokio::test]
async fn test_add_then_get_counts_each_call() {
    let store = MemoryStore::new();

    assert_eq!(run(&store, "/add apple").await, "You have said apple for 1 times.");
    assert_eq!(run(&store, "/add apple").await, "You have said apple for 2 times.");
    assert_eq!(run(&store, "/get apple").await, "The value for apple is 2.");
}

#[tokio::test]
async fn test_add_after_set_continues_from_value() {
    let store = MemoryStore::new();

    assert_eq!(run(&store, "/set apple 41").await, "Set apple to 41.");
    assert_eq!(run(&store, "/add apple").await, "You have said apple for 42 times.");
}

#[tokio::test]
async fn test_keys_are_independent() {
    let store = MemoryStore::new();

    run(&store, "/add apple").await;
    run(&store, "/add apple").await;
    run(&store, "/add pear").await;

    assert_eq!(run(&store, "/get apple").await, "The value for apple is 2.");
    assert_eq!(run(&store, "/get pear").await, "The value for pear is 1.");
    assert_eq!(run(&store, "/get Apple").await, "Apple does not exist.");
}

#[tokio::test]
async fn test_delete_then_add_starts_over() {
    let store = MemoryStore::new();

    run(&store, "/set apple 7").await;
    assert_eq!(run(&store, "/delete apple").await, "Deleted apple.");
    assert_eq!(run(&store, "/get apple").await, "apple does not exist.");
    assert_eq!(run(&store, "/add apple").await, "You have said apple for 1 times.");
}

#[tokio::test]
async fn test_usage_messages_do_not_touch_store() {
    let store = MemoryStore::new();

    assert_eq!(run(&store, "/add").await, "Usage: /add <keyword>");
    assert_eq!(run(&store, "/set apple").await, "Usage: /set <key> <value>");
    assert_eq!(run(&store, "/set apple many").await, "Usage: /set <key> <value>");
    assert_eq!(run(&store, "/get").await, "Usage: /get <key>");
    assert_eq!(run(&store, "/delete").await, "Usage: /delete <key>");
    assert_eq!(run(&store, "/hello").await, "Usage: /hello <keyword>");
    assert_eq!(
        run(&store, "/find_matches alice").await,
        "Usage: /find_matches <id> <interest1> [interest2 ...]"
    );

    assert_eq!(store.snapshot().await, Value::Null);
}

#[tokio::test]
async fn test_help_and_hello_replies() {
    let store = MemoryStore::new();

    assert_eq!(run(&store, "/help").await, "Helping you helping you.");
    assert_eq!(run(&store, "/hello Kevin").await, "Good day,Kevin!");
}

#[tokio::test]
async fn test_find_matches_round_trip() {
    let store = MemoryStore::new();

    assert_eq!(
        run(&store, "/find_matches alice chess go").await,
        "No other users found."
    );
    assert_eq!(
        run(&store, "/find_matches bob go rust").await,
        "alice matches with you on: go"
    );
    assert_eq!(
        run(&store, "/find_matches carol knitting").await,
        "No matches found."
    );
}

#[tokio::test]
async fn test_store_failure_uses_error_reply() {
    let store = FlakyStore {
        fail_writes: true,
        ..Default::default()
    };

    let reply = run(&store, "/add apple").await;
    assert!(reply.starts_with("Sorry, something went wrong: "));
    assert!(reply.contains("service unavailable"));

    let reply = run(&store, "/set apple 3").await;
    assert!(reply.starts_with("Sorry, something went wrong: "));
}

#[tokio::test]
async fn test_read_failure_on_get_uses_error_reply() {
    let store = FlakyStore {
        fail_reads: true,
        ..Default::default()
    };

    let reply = run(&store, "/get apple").await;
    assert!(reply.starts_with("Sorry, something went wrong: "));
}

#[tokio::test]
async fn test_delete_failure_names_the_key() {
    let store = FlakyStore {
        fail_deletes: true,
        ..Default::default()
    };
    store.inner.set("keywords/apple", Value::from(3)).await.unwrap();

    let reply = run(&store, "/delete apple").await;
    assert!(reply.starts_with("Error deleting apple: "), "got {reply}");
    assert_eq!(run(&store, "/get apple").await, "The value for apple is 3.");
}

#[tokio::test]
async fn test_find_matches_keeps_saved_profile_when_scan_fails() {
    let store = FlakyStore {
        fail_reads: true,
        ..Default::default()
    };

    let reply = run(&store, "/find_matches alice chess").await;
    assert!(reply.starts_with("Sorry, something went wrong: "));
    assert_eq!(
        store.inner.snapshot().await,
        serde_json::json!({"users": {"alice": {"interests": ["chess"]}}})
    );
}

#[tokio::test]
async fn test_converse_relays_reply_unchanged() {
    let chat = StubChat::answering("  **Hello** there  ");

    assert_eq!(converse(&chat, "hi bot").await, "  **Hello** there  ");
    assert_eq!(*chat.prompts.lock().unwrap(), vec!["hi bot".to_string()]);
}

#[tokio::test]
async fn test_converse_forwards_empty_text() {
    let chat = StubChat::answering("...");

    converse(&chat, "").await;
    assert_eq!(*chat.prompts.lock().unwrap(), vec![String::new()]);
}

#[tokio::test]
async fn test_converse_failure_uses_error_reply() {
    let chat = StubChat::failing();

    let reply = converse(&chat, "hi").await;
    assert!(reply.starts_with("Sorry, something went wrong: "));
    assert!(reply.contains("model overloaded"));
}

#[test]
fn test_bot_handler_schema_builds() {
    let handler = BotHandler::new(
        Arc::new(MemoryStore::new()),
        Arc::new(StubChat::answering("ok")),
    );

    let _schema = handler.schema();
    let _cloned = handler.clone();
}
