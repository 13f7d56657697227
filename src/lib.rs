//! xcodebuild-kit - typed xcodebuild invocations
//!
//! This crate builds, validates, and executes `xcodebuild` command lines
//! without hand-assembled argument strings: a set of build actions with a
//! canonical emission order, validated destination specifiers, a generic
//! option model, an argv assembler, a blocking process runner, and project
//! discovery over `xcodebuild -list -json`.

pub mod action;
pub mod command;
pub mod config;
pub mod destination;
pub mod error;
pub mod option;
pub mod process;
pub mod project;

pub use action::{Action, ActionSet};
pub use command::{Commandable, Xcodebuild};
pub use config::Config;
pub use destination::{Architecture, Destination, DestinationError, Platform};
pub use error::Error;
pub use option::Opt;
pub use process::{RunResult, ToolRunner};
pub use project::Project;
