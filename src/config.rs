use anyhow::{anyhow, Context, Result};
use config::{File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
pub const CREDENTIAL_PATH_VAR: &str = "FIREBASE_CRED_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "./config.ini";
pub const DEFAULT_CREDENTIAL_PATH: &str = "/key/serviceAccountKey.json";
pub const DEFAULT_HTTP_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub credential_path: PathBuf,
    pub chat: ChatConfig,
    pub http_port: u16,
}

/// Connection settings for the chat-completion deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    #[serde(alias = "BASICURL", alias = "basicurl")]
    pub base_url: String,
    #[serde(alias = "MODELNAME", alias = "modelname")]
    pub model_name: String,
    #[serde(alias = "APIVERSION", alias = "apiversion")]
    pub api_version: String,
    #[serde(alias = "ACCESS_TOKEN")]
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "TELEGRAM")]
    telegram: TelegramSection,
    #[serde(alias = "FIREBASE")]
    firebase: FirebaseSection,
    #[serde(alias = "CHATGPT")]
    chatgpt: ChatConfig,
    #[serde(default, alias = "HEALTH")]
    health: Option<HealthSection>,
}

#[derive(Debug, Deserialize)]
struct TelegramSection {
    #[serde(alias = "ACCESS_TOKEN")]
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FirebaseSection {
    #[serde(alias = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Deserialize)]
struct HealthSection {
    #[serde(default, alias = "PORT")]
    port: Option<String>,
}

impl Config {
    /// Loads the INI file named by `CONFIG_PATH` and picks up the credential
    /// path from `FIREBASE_CRED_PATH`, falling back to the defaults.
    pub fn load() -> Result<Self> {
        let config_path = path_from_env(CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH);
        let credential_path = path_from_env(CREDENTIAL_PATH_VAR, DEFAULT_CREDENTIAL_PATH);
        Self::from_file(&config_path, credential_path)
    }

    pub fn from_file(path: &Path, credential_path: PathBuf) -> Result<Self> {
        let raw: RawConfig = config::Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Ini).required(true))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let telegram_bot_token = required(raw.telegram.access_token, "TELEGRAM.ACCESS_TOKEN")?;
        let database_url = required(raw.firebase.database_url, "FIREBASE.DATABASE_URL")?;

        let chat = ChatConfig {
            base_url: required(raw.chatgpt.base_url, "CHATGPT.BASICURL")?,
            model_name: required(raw.chatgpt.model_name, "CHATGPT.MODELNAME")?,
            api_version: required(raw.chatgpt.api_version, "CHATGPT.APIVERSION")?,
            access_token: required(raw.chatgpt.access_token, "CHATGPT.ACCESS_TOKEN")?,
        };

        let http_port = match raw.health.and_then(|h| h.port) {
            Some(port) if !port.trim().is_empty() => port
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid HEALTH.PORT"))?,
            _ => DEFAULT_HTTP_PORT,
        };

        Ok(Config {
            telegram_bot_token,
            database_url,
            credential_path,
            chat,
            http_port,
        })
    }
}

fn required(value: String, name: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(anyhow!("{name} must be set"));
    }
    Ok(value.trim().to_string())
}

fn path_from_env(var: &str, default: &str) -> PathBuf {
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
