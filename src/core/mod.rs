pub mod config;
pub mod error;
pub mod types;

pub use config::{BotConfig, CommandFeatures};
pub use types::{BroadcastCredentials, User, UserId, Watch};
