//! Command assembly for xcodebuild invocations
//!
//! [`Commandable`] is the one capability shared by every piece of an
//! invocation: it renders to an argument vector. [`Xcodebuild`] aggregates
//! an action set and an ordered list of options into the final argv.

use std::io;
use std::path::Path;

use crate::action::{Action, ActionSet};
use crate::option::Opt;
use crate::process::{self, RunResult, ToolRunner};

/// A value that renders to a portion of a command line.
pub trait Commandable {
    /// The argument tokens this value contributes, in order.
    fn arguments(&self) -> Vec<String>;

    /// The space-joined form of [`arguments`](Commandable::arguments).
    fn command(&self) -> String {
        self.arguments().join(" ")
    }
}

/// An assembled xcodebuild invocation.
///
/// Actions collapse into an [`ActionSet`] (canonical emission order);
/// options keep their insertion order. Assembly itself never fails —
/// execution is delegated to the [`process`] module.
#[derive(Debug, Clone)]
pub struct Xcodebuild {
    program: String,
    actions: ActionSet,
    options: Vec<Opt>,
}

impl Default for Xcodebuild {
    fn default() -> Self {
        Self::new()
    }
}

impl Xcodebuild {
    /// An invocation of the default `xcodebuild` program with no actions
    /// or options.
    pub fn new() -> Self {
        Self::with_program("xcodebuild")
    }

    /// An invocation of a custom program (an alternate toolchain shim, or a
    /// stub under test).
    pub fn with_program(program: impl Into<String>) -> Self {
        Xcodebuild {
            program: program.into(),
            actions: ActionSet::new(),
            options: Vec::new(),
        }
    }

    /// Add a single action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.insert(action);
        self
    }

    /// Merge a whole action set.
    pub fn actions(mut self, actions: ActionSet) -> Self {
        self.actions = self.actions.union(actions);
        self
    }

    /// Append an option. Options are emitted in the order they were added.
    pub fn option(mut self, option: Opt) -> Self {
        self.options.push(option);
        self
    }

    /// Append several options, preserving their order.
    pub fn options(mut self, options: impl IntoIterator<Item = Opt>) -> Self {
        self.options.extend(options);
        self
    }

    /// The program name this invocation will resolve and execute.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Execute the assembled invocation, blocking until the child exits.
    ///
    /// The child's exit code is reported in the returned [`RunResult`], not
    /// raised as an error; only spawn/resolution failures error here.
    pub fn launch(&self, working_dir: Option<&Path>) -> io::Result<RunResult> {
        let args = self.arguments();
        process::SystemRunner.run(&self.program, &args[1..], working_dir)
    }
}

impl Commandable for Xcodebuild {
    fn arguments(&self) -> Vec<String> {
        let mut args = vec![self.program.clone()];
        args.extend(self.actions.arguments());
        for option in &self.options {
            args.extend(option.arguments());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::Destination;

    #[test]
    fn test_bare_invocation() {
        let build = Xcodebuild::new();
        assert_eq!(build.arguments(), vec!["xcodebuild"]);
        assert_eq!(build.command(), "xcodebuild");
    }

    #[test]
    fn test_program_then_actions_then_options() {
        let build = Xcodebuild::new()
            .action(Action::Build)
            .action(Action::Test)
            .option(Opt::scheme("MyApp"))
            .option(Opt::configuration("Debug"));
        assert_eq!(
            build.arguments(),
            vec![
                "xcodebuild",
                "test",
                "build",
                "-scheme",
                "MyApp",
                "-configuration",
                "Debug",
            ]
        );
        assert_eq!(
            build.command(),
            "xcodebuild test build -scheme MyApp -configuration Debug"
        );
    }

    #[test]
    fn test_options_preserve_insertion_order() {
        let build = Xcodebuild::new()
            .option(Opt::sdk("iphoneos"))
            .option(Opt::scheme("MyApp"));
        assert_eq!(
            build.arguments(),
            vec!["xcodebuild", "-sdk", "iphoneos", "-scheme", "MyApp"]
        );
    }

    #[test]
    fn test_destination_renders_as_single_token() {
        let build = Xcodebuild::new()
            .action(Action::Test)
            .option(Opt::destination(&Destination::mac_os()));
        assert_eq!(
            build.arguments(),
            vec![
                "xcodebuild",
                "test",
                "-destination",
                "'platform=macOS,arch=x86_64'",
            ]
        );
    }

    #[test]
    fn test_list_json_invocation() {
        let build = Xcodebuild::new().option(Opt::list()).option(Opt::json());
        assert_eq!(build.command(), "xcodebuild -list -json");
    }

    #[test]
    fn test_custom_program_name() {
        let build = Xcodebuild::with_program("xcrun").option(Opt::version());
        assert_eq!(build.arguments(), vec!["xcrun", "-version"]);
    }
}
