//! Posting broadcasts to the external social network

pub mod client;

pub use client::BroadcastClient;

use crate::core::error::Result;
use crate::core::types::BroadcastCredentials;
use async_trait::async_trait;

/// External broadcast API
#[async_trait]
pub trait BroadcastApi: Send + Sync {
    /// Post `text` as the user identified by `credentials`
    async fn post_broadcast(&self, credentials: &BroadcastCredentials, text: &str) -> Result<()>;
}
