//! Core type definitions used throughout the codebase
//!
//! `User` and `Watch` are owned by the persistence layer; the command core
//! only reads them and mutates the notification fields of `User`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Credentials used when posting a broadcast on the user's behalf
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastCredentials {
    pub uid: String,
    pub key: String,
    pub secret: String,
}

/// A chat user as seen by the command layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Bare address, shown in `status`
    pub jid: String,
    /// Full address including resource; replies are sent here
    pub jid_full: String,
    /// Presence status as last reported by the transport
    pub status: String,
    /// Whether notifications are delivered at all
    pub active: bool,
    /// Alerts are suppressed until this instant
    pub quiet_until: Option<DateTime<Utc>>,
    pub credentials: BroadcastCredentials,
}

impl User {
    pub fn new(jid: impl Into<String>, jid_full: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            jid: jid.into(),
            jid_full: jid_full.into(),
            status: "online".to_string(),
            active: true,
            quiet_until: None,
            credentials: BroadcastCredentials::default(),
        }
    }

    pub fn with_credentials(mut self, credentials: BroadcastCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn is_quiet_at(&self, now: DateTime<Utc>) -> bool {
        self.quiet_until.is_some_and(|until| until > now)
    }

    pub fn is_quiet(&self) -> bool {
        self.is_quiet_at(Utc::now())
    }
}

/// A monitored URL belonging to one user. Identity is (user_id, url).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Watch {
    pub url: String,
    pub user_id: UserId,
}

impl Watch {
    pub fn new(url: impl Into<String>, user_id: UserId) -> Self {
        Self {
            url: url.into(),
            user_id,
        }
    }
}
