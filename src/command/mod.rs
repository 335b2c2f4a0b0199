//! Command pipeline
//!
//! Raw line -> Dispatcher -> Registry lookup -> ArgPolicy -> Command action -> reply:
//! `quiet 1h` -> `quiet` -> ArgRequired("1h") -> Action::Quiet -> "You won't hear from me..."

pub mod builtins;
pub mod dispatcher;
pub mod duration;
pub mod policy;
pub mod registry;

pub use builtins::Action;
pub use dispatcher::{Dispatch, Dispatcher, Invocation, Messenger, Outcome};
pub use duration::{parse_leading_minutes, parse_minutes};
pub use policy::{ArgPolicy, ExecutionInput, ValidationFailure};
pub use registry::{Command, Registry};
