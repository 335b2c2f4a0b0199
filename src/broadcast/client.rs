//! Async HTTP client for the broadcast API
//!
//! Posts a status update on behalf of a user. Each call is a single
//! request; the caller decides what a failure means.

use crate::broadcast::BroadcastApi;
use crate::core::config::BroadcastConfig;
use crate::core::error::{BotError, Result};
use crate::core::types::BroadcastCredentials;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Async client for posting broadcasts
pub struct BroadcastClient {
    client: Client,
    api_url: String,
}

impl BroadcastClient {
    pub fn new(api_url: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
        }
    }

    pub fn from_config(config: &BroadcastConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl BroadcastApi for BroadcastClient {
    async fn post_broadcast(&self, credentials: &BroadcastCredentials, text: &str) -> Result<()> {
        let request = BroadcastRequest {
            uid: &credentials.uid,
            text,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &credentials.key)
            .header("x-api-secret", &credentials.secret)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Broadcast(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(BotError::Broadcast(describe_error(status.as_u16(), &error_text)));
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct BroadcastRequest<'a> {
    uid: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    msg: Option<String>,
    code: Option<i64>,
}

/// Prefer the API's own message when the body is the usual error JSON
fn describe_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody { msg: Some(msg), code }) => match code {
            Some(code) => format!("API error {} ({}): {}", status, code, msg),
            None => format!("API error {}: {}", status, msg),
        },
        _ => format!("API error {}: {}", status, body),
    }
}
