//! Dispatch - turns a raw chat line into exactly one command run

use crate::broadcast::BroadcastApi;
use crate::command::policy::{ExecutionInput, ValidationFailure};
use crate::command::registry::Registry;
use crate::core::types::User;
use crate::session::Session;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Outgoing text channel to chat users
pub trait Messenger: Send + Sync {
    /// Fire-and-forget; delivery is ordered per destination
    fn send_plain(&self, to: &str, text: &str);
}

/// Everything a command's execution step may touch
pub struct Invocation<'a> {
    pub user: &'a mut User,
    pub session: &'a mut dyn Session,
    pub registry: &'a Registry,
    pub messenger: &'a Arc<dyn Messenger>,
    pub broadcaster: &'a Arc<dyn BroadcastApi>,
    pub runtime: &'a Handle,
    /// Clock reading taken once per dispatch
    pub now: DateTime<Utc>,
}

impl Invocation<'_> {
    /// Send `text` to the calling user
    pub fn reply(&self, text: &str) -> Outcome {
        self.messenger.send_plain(&self.user.jid_full, text);
        Outcome::Replied
    }
}

/// Result of a command's execution step
#[derive(Debug)]
pub enum Outcome {
    /// The reply has been sent
    Replied,
    /// The reply will be sent by this task when the external call finishes
    Deferred(JoinHandle<()>),
}

/// Result of dispatching one line
#[derive(Debug)]
pub enum Dispatch {
    /// Blank line, nothing sent
    Empty,
    /// No such command, nothing sent; the caller decides how to respond
    UnknownCommand(String),
    /// The policy rejected the argument; the failure text was sent
    Rejected(ValidationFailure),
    /// The command ran and replied
    Completed,
    /// The command is waiting on an external call and will reply later.
    /// Dropping the handle does not cancel it.
    Deferred(JoinHandle<()>),
}

impl From<Outcome> for Dispatch {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Replied => Dispatch::Completed,
            Outcome::Deferred(handle) => Dispatch::Deferred(handle),
        }
    }
}

/// Entry point from the chat transport
pub struct Dispatcher {
    registry: Arc<Registry>,
    messenger: Arc<dyn Messenger>,
    broadcaster: Arc<dyn BroadcastApi>,
    runtime: Handle,
}

impl Dispatcher {
    pub fn new(
        registry: Registry,
        messenger: Arc<dyn Messenger>,
        broadcaster: Arc<dyn BroadcastApi>,
        runtime: Handle,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            messenger,
            broadcaster,
            runtime,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve `line` to a command, apply its policy and run it.
    ///
    /// At most one reply is sent per call, possibly later for deferred
    /// commands. Never fails: every failure mode becomes a reply.
    pub fn dispatch(&self, line: &str, user: &mut User, session: &mut dyn Session) -> Dispatch {
        let line = line.trim();
        if line.is_empty() {
            return Dispatch::Empty;
        }

        let (name, args) = split_command(line);
        let name = name.to_lowercase();
        let Some(command) = self.registry.get(&name) else {
            tracing::debug!(user = %user.jid, command = %name, "Unknown command");
            return Dispatch::UnknownCommand(name);
        };

        tracing::debug!(user = %user.jid, command = %name, "Dispatching");
        let extended_help = command.extended_help();
        let input = match command
            .policy()
            .apply(command.name(), extended_help, args, user, &*session)
        {
            Ok(input) => input,
            Err(failure) => {
                tracing::debug!(user = %user.jid, command = %name, reason = %failure, "Arguments rejected");
                self.messenger.send_plain(&user.jid_full, &failure.to_string());
                return Dispatch::Rejected(failure);
            }
        };

        let mut ctx = self.invocation(user, session);
        command.execute(input, &mut ctx).into()
    }

    /// Run a command's action directly, skipping its argument policy.
    ///
    /// Returns None if `name` is not registered.
    pub fn execute(
        &self,
        name: &str,
        input: ExecutionInput,
        user: &mut User,
        session: &mut dyn Session,
    ) -> Option<Dispatch> {
        let command = self.registry.get(name)?;
        let mut ctx = self.invocation(user, session);
        Some(command.execute(input, &mut ctx).into())
    }

    fn invocation<'a>(&'a self, user: &'a mut User, session: &'a mut dyn Session) -> Invocation<'a> {
        Invocation {
            user,
            session,
            registry: &self.registry,
            messenger: &self.messenger,
            broadcaster: &self.broadcaster,
            runtime: &self.runtime,
            now: Utc::now(),
        }
    }
}

/// Split on the first whitespace into (command name, trimmed remainder)
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    }
}
