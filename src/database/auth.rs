//! Service account authentication for the Realtime Database REST API.
//!
//! A signed RS256 assertion is exchanged at the account's token endpoint for a
//! short-lived OAuth2 access token, which is passed to the database as the
//! `access_token` query parameter.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;

use crate::error::StoreError;

pub const DATABASE_SCOPES: &str =
    "https://www.googleapis.com/auth/firebase.database https://www.googleapis.com/auth/userinfo.email";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

/// The fields we need from a service account JSON key file.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: i64,
}

pub struct ServiceAccountAuth {
    client_email: String,
    token_uri: String,
    signing_key: SigningKey<Sha256>,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for ServiceAccountAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountAuth")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

impl ServiceAccountAuth {
    pub fn from_file(path: &Path) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Auth(format!("Failed to read credential file {}: {e}", path.display()))
        })?;
        let key: ServiceAccountKey = serde_json::from_str(&raw)?;
        Self::from_key(key)
    }

    pub fn from_key(key: ServiceAccountKey) -> Result<Self, StoreError> {
        // Keys pasted through environment files often carry literal "\n".
        let pem = key.private_key.replace("\\n", "\n");
        let pem = pem.trim();

        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| StoreError::Auth(format!("Failed to parse RSA private key: {e}")))?;

        Ok(Self {
            client_email: key.client_email,
            token_uri: key.token_uri,
            signing_key: SigningKey::<Sha256>::new(private_key),
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Builds the signed JWT sent to the token endpoint.
    pub fn signed_assertion(&self, issued_at: i64) -> Result<String, StoreError> {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let claims = Claims {
            iss: &self.client_email,
            scope: DATABASE_SCOPES,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        let claims = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);

        let signing_input = format!("{header}.{claims}");
        let signature = self
            .signing_key
            .try_sign(signing_input.as_bytes())
            .map_err(|e| StoreError::Auth(format!("Failed to sign assertion: {e}")))?;

        Ok(format!(
            "{signing_input}.{}",
            URL_SAFE_NO_PAD.encode(signature.to_bytes())
        ))
    }

    /// Returns a valid access token, fetching a new one when the cached token
    /// is missing or about to expire.
    pub async fn access_token(&self, client: &reqwest::Client) -> Result<String, StoreError> {
        let mut cached = self.cached.lock().await;
        let now = chrono::Utc::now().timestamp();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - REFRESH_MARGIN_SECS > now {
                return Ok(token.token.clone());
            }
        }

        let assertion = self.signed_assertion(now)?;
        let response = client
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!(
                "Token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response.json().await?;
        tracing::debug!(
            "Obtained database access token for {} (expires in {}s)",
            self.client_email,
            token.expires_in
        );

        *cached = Some(CachedToken {
            token: token.access_token.clone(),
            expires_at: now + token.expires_in,
        });
        Ok(token.access_token)
    }
}
