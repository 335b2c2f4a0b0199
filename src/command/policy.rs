//! Argument policies - how a command's raw argument text is validated
//! before the command runs.

use crate::core::types::{User, Watch};
use crate::session::Session;
use thiserror::Error;

/// Validation strategy declared by each command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPolicy {
    /// Anything goes, including an empty argument
    NoArgs,
    /// The argument must be non-empty
    ArgRequired,
    /// The argument must name one of the caller's watches
    WatchRequired,
}

/// What a command's execution step receives once its policy passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionInput {
    Text(String),
    Watch {
        watch: Watch,
        /// Free text after the watch reference, if any
        extra: Option<String>,
    },
}

impl ExecutionInput {
    /// Argument text for text-taking commands; empty for watch inputs
    pub fn text(&self) -> &str {
        match self {
            ExecutionInput::Text(text) => text,
            ExecutionInput::Watch { .. } => "",
        }
    }
}

/// A rejected argument. The display text is the reply sent to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Arguments required for {name}:\n{help}")]
    ArgumentsRequired { name: String, help: String },

    #[error("Cannot find watch for {reference}")]
    WatchNotFound { reference: String },
}

impl ArgPolicy {
    /// Check `args` for the command `name`, producing its execution input.
    pub fn apply(
        self,
        name: &str,
        extended_help: &str,
        args: &str,
        user: &User,
        session: &dyn Session,
    ) -> Result<ExecutionInput, ValidationFailure> {
        let missing = || ValidationFailure::ArgumentsRequired {
            name: name.to_string(),
            help: extended_help.to_string(),
        };

        match self {
            ArgPolicy::NoArgs => Ok(ExecutionInput::Text(args.to_string())),
            ArgPolicy::ArgRequired => {
                if args.is_empty() {
                    return Err(missing());
                }
                Ok(ExecutionInput::Text(args.to_string()))
            }
            ArgPolicy::WatchRequired => {
                if !looks_like_reference(args) {
                    return Err(missing());
                }
                let (reference, extra) = match args.split_once(' ') {
                    Some((reference, extra)) => (reference, Some(extra.to_string())),
                    None => (args, None),
                };
                match session.find_watch(reference, user.id) {
                    Some(watch) => Ok(ExecutionInput::Watch { watch, extra }),
                    None => Err(ValidationFailure::WatchNotFound {
                        reference: reference.to_string(),
                    }),
                }
            }
        }
    }
}

/// Whether `args` could be a watch reference.
///
/// Any non-empty text is accepted; the session lookup is the real check.
fn looks_like_reference(args: &str) -> bool {
    !args.is_empty()
}
