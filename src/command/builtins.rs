//! Built-in commands and their execution steps

use crate::command::dispatcher::{Invocation, Outcome};
use crate::command::duration::parse_leading_minutes;
use crate::command::policy::{ArgPolicy, ExecutionInput, ValidationFailure};
use crate::command::registry::Command;
use crate::core::config::CommandFeatures;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

const QUIET_EXTENDED_HELP: &str = "Quiet alerts for a period of time.

Available time units:  m, h, d

Example, quiet for one hour:
  quiet 1h
";

/// The execution step a command runs once its policy passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Status,
    Help,
    Unwatch,
    Say,
    On,
    Off,
    Quiet,
}

/// Every built-in command enabled by `features`
pub fn builtin_commands(features: &CommandFeatures) -> Vec<Command> {
    let mut commands = vec![
        Command::new("status", "Check your status.", ArgPolicy::NoArgs, Action::Status),
        Command::new("help", "You need help.", ArgPolicy::NoArgs, Action::Help),
        Command::new("say", "Say something.", ArgPolicy::ArgRequired, Action::Say),
        Command::new("on", "Enable notify.", ArgPolicy::NoArgs, Action::On),
        Command::new("off", "Disable notify.", ArgPolicy::NoArgs, Action::Off),
        Command::new("quiet", "Temporarily quiet alerts.", ArgPolicy::ArgRequired, Action::Quiet)
            .with_extended_help(QUIET_EXTENDED_HELP),
    ];
    if features.unwatch {
        commands.push(Command::new(
            "unwatch",
            "Stop watching a page.",
            ArgPolicy::WatchRequired,
            Action::Unwatch,
        ));
    }
    commands
}

impl Command {
    /// Run this command's action on an already validated input.
    pub fn execute(&self, input: ExecutionInput, ctx: &mut Invocation<'_>) -> Outcome {
        match self.action() {
            Action::Status => status(ctx),
            Action::Help => help(input.text(), ctx),
            Action::Unwatch => unwatch(self, input, ctx),
            Action::Say => say(input.text(), ctx),
            Action::On => set_active(true, ctx),
            Action::Off => set_active(false, ctx),
            Action::Quiet => quiet(input.text(), ctx),
        }
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn status(ctx: &mut Invocation<'_>) -> Outcome {
    let user = &*ctx.user;
    let mut lines = vec![
        format!("Jid:  {}", user.jid),
        format!("Jabber status:  {}", user.status),
        format!(
            "Notify status:  {}",
            if user.active { "Active" } else { "Inactive" }
        ),
    ];
    if let Some(until) = user.quiet_until.filter(|_| user.is_quiet_at(ctx.now)) {
        lines.push(format!(
            "All alerts are quieted until {}",
            format_timestamp(until)
        ));
    }
    ctx.reply(&lines.join("\n"))
}

fn help(args: &str, ctx: &mut Invocation<'_>) -> Outcome {
    let text = if args.is_empty() {
        ctx.registry.help_listing()
    } else {
        match ctx.registry.get(args.trim()) {
            Some(command) => format!(
                "Help for {}:\n\n{}",
                command.name(),
                command.extended_help()
            ),
            None => format!("Unknown command {}.", args),
        }
    };
    ctx.reply(&text)
}

fn unwatch(command: &Command, input: ExecutionInput, ctx: &mut Invocation<'_>) -> Outcome {
    let ExecutionInput::Watch { watch, .. } = input else {
        let failure = ValidationFailure::ArgumentsRequired {
            name: command.name().to_string(),
            help: command.extended_help().to_string(),
        };
        return ctx.reply(&failure.to_string());
    };
    ctx.session.delete_watch(&watch);
    tracing::info!(user = %ctx.user.jid, url = %watch.url, "Watch deletion scheduled");
    ctx.reply(&format!("Stopped watching {}", watch.url))
}

fn say(args: &str, ctx: &mut Invocation<'_>) -> Outcome {
    if args.is_empty() {
        return ctx.reply("You say nothing :(");
    }

    let messenger = Arc::clone(ctx.messenger);
    let broadcaster = Arc::clone(ctx.broadcaster);
    let to = ctx.user.jid_full.clone();
    let credentials = ctx.user.credentials.clone();
    let text = args.to_string();

    let handle = ctx.runtime.spawn(async move {
        match broadcaster.post_broadcast(&credentials, &text).await {
            Ok(()) => messenger.send_plain(&to, &format!("OK, you said: {}", text)),
            Err(e) => {
                tracing::error!(user = %to, error = %e, "Broadcast failed");
                messenger.send_plain(&to, &format!("Error, send: {} failed", text));
            }
        }
    });
    Outcome::Deferred(handle)
}

fn set_active(active: bool, ctx: &mut Invocation<'_>) -> Outcome {
    ctx.user.active = active;
    tracing::info!(user = %ctx.user.jid, active, "Notify status changed");
    ctx.reply(if active { "Enabled notify." } else { "Disabled notify." })
}

fn quiet(args: &str, ctx: &mut Invocation<'_>) -> Outcome {
    // Unreachable through dispatch: ArgRequired rejects empty input first.
    if args.is_empty() {
        return ctx.reply("How long would you like me to be quiet?");
    }

    let now = ctx.now;
    match parse_leading_minutes(args).and_then(|minutes| quiet_deadline(now, minutes)) {
        Some(until) => {
            ctx.user.quiet_until = Some(until);
            tracing::info!(user = %ctx.user.jid, until = %until, "Alerts quieted");
            ctx.reply(&format!(
                "You won't hear from me again until {}",
                format_timestamp(until)
            ))
        }
        None => ctx.reply(
            "I don't understand how long you want me to be quiet.  Try: quiet 5m",
        ),
    }
}

/// `now + minutes`, or None if it does not fit in a timestamp
fn quiet_deadline(now: DateTime<Utc>, minutes: u64) -> Option<DateTime<Utc>> {
    let minutes = i64::try_from(minutes).ok()?;
    now.checked_add_signed(Duration::try_minutes(minutes)?)
}
