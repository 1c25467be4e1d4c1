//! GCP authentication using service account
//!
//! Handles OAuth2 token generation (JWT bearer grant) for the Drive API.
//! Key material is parsed once at startup; tokens are cached until shortly
//! before they expire.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use base64::Engine;
use ring::signature::{RsaKeyPair, RSA_PKCS1_SHA256};
use tokio::sync::RwLock;

use crate::config::DriveConfig;
use crate::error::{Error, Result};

/// Refresh when fewer than this many seconds of validity remain
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime requested for each signed assertion
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(serde::Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    token_uri: String,
}

/// GCP authentication manager
pub struct GcpAuth {
    client_email: String,
    token_uri: String,
    scope: String,
    key_pair: RsaKeyPair,
    http: reqwest::Client,
    /// Cached access token
    token: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl GcpAuth {
    /// Create from the Drive section of the configuration
    ///
    /// Inline key JSON wins over a key file path.
    pub fn from_config(config: &DriveConfig) -> Result<Self> {
        match (&config.service_account_json, &config.service_account_key_path) {
            (Some(json), _) => Self::from_service_account_json(json, config.scope.clone()),
            (None, Some(path)) => Self::from_service_account(path, config.scope.clone()),
            (None, None) => Err(Error::Config(
                "Drive access needs GOOGLE_SERVICE_ACCOUNT_JSON or GOOGLE_APPLICATION_CREDENTIALS"
                    .to_string(),
            )),
        }
    }

    /// Create from service account JSON key file
    pub fn from_service_account(key_path: impl AsRef<Path>, scope: String) -> Result<Self> {
        let key_path = key_path.as_ref();
        let content = std::fs::read_to_string(key_path).map_err(|e| {
            Error::Config(format!(
                "Failed to read service account key {}: {}",
                key_path.display(),
                e
            ))
        })?;
        Self::from_service_account_json(&content, scope)
    }

    /// Create from service account JSON key material
    pub fn from_service_account_json(json: &str, scope: String) -> Result<Self> {
        let key: ServiceAccountKey = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid service account key format: {}", e)))?;

        let private_key = key.private_key.replace("\\n", "\n");
        let pem = pem::parse(&private_key)
            .map_err(|e| Error::Config(format!("Failed to parse private key PEM: {}", e)))?;
        let key_pair = RsaKeyPair::from_pkcs8(pem.contents())
            .map_err(|e| Error::Config(format!("Failed to parse private key: {:?}", e)))?;

        Ok(Self {
            client_email: key.client_email,
            token_uri: key.token_uri,
            scope,
            key_pair,
            http: reqwest::Client::new(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Service account identity
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    /// Get a valid access token (refreshing if needed)
    pub async fn get_token(&self) -> Result<String> {
        {
            let token = self.token.read().await;
            if let Some(ref cached) = *token {
                if cached.expires_at > Instant::now() + REFRESH_MARGIN {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let fresh = self.refresh_token().await?;
        let access_token = fresh.access_token.clone();
        *self.token.write().await = Some(fresh);

        Ok(access_token)
    }

    /// Build the RS256-signed JWT assertion
    fn signed_assertion(&self, issued_at: i64) -> Result<String> {
        let claims = serde_json::json!({
            "iss": self.client_email,
            "scope": self.scope,
            "aud": self.token_uri,
            "iat": issued_at,
            "exp": issued_at + ASSERTION_LIFETIME_SECS,
        });

        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(r#"{"alg":"RS256","typ":"JWT"}"#.as_bytes());
        let payload = engine.encode(claims.to_string().as_bytes());
        let signing_input = format!("{}.{}", header, payload);

        let mut signature = vec![0u8; self.key_pair.public().modulus_len()];
        self.key_pair
            .sign(
                &RSA_PKCS1_SHA256,
                &ring::rand::SystemRandom::new(),
                signing_input.as_bytes(),
                &mut signature,
            )
            .map_err(|e| Error::Internal(format!("Failed to sign JWT: {:?}", e)))?;

        Ok(format!("{}.{}", signing_input, engine.encode(&signature)))
    }

    /// Exchange a fresh assertion for an access token
    async fn refresh_token(&self) -> Result<CachedToken> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Internal(format!("System clock before epoch: {}", e)))?
            .as_secs() as i64;
        let jwt = self.signed_assertion(now)?;

        tracing::debug!("Requesting access token for {}", self.client_email);

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", jwt.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Token exchange request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamUnavailable(format!(
                "Token exchange failed ({}): {}",
                status, body
            )));
        }

        #[derive(serde::Deserialize)]
        struct TokenResponse {
            access_token: String,
            #[serde(default)]
            expires_in: Option<u64>,
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            Error::UpstreamUnavailable(format!("Failed to parse token response: {}", e))
        })?;

        // Tokens are typically valid for 1 hour
        let lifetime = Duration::from_secs(token_response.expires_in.unwrap_or(3600));

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}
