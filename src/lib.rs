//! Bot Commands - command registry and dispatch for a notification chat bot

pub mod broadcast;
pub mod command;
pub mod core;
pub mod session;
