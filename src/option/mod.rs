//! Command-line options for xcodebuild invocations
//!
//! An [`Opt`] is a single option in one of three shapes, fixed at
//! construction:
//! - a bare flag: `-quiet`
//! - a flag with a value: `-scheme MyApp` (two argv tokens)
//! - a key=value setting: `ONLY_ACTIVE_ARCH=NO` (one token, no dash), the
//!   form xcodebuild uses for build settings and user defaults.
//!
//! Contents are not validated or shell-escaped; values that need quoting
//! are the caller's concern. The constructors below cover the commonly
//! used options; arbitrary ones can be built with [`Opt::flag`],
//! [`Opt::with_value`], and [`Opt::setting`].

use crate::command::Commandable;
use crate::destination::{Architecture, Destination};

/// A single xcodebuild command-line option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opt {
    name: String,
    value: Option<String>,
    key_value: bool,
}

impl Opt {
    /// A bare flag, rendered as `-name`.
    pub fn flag(name: impl Into<String>) -> Opt {
        Opt {
            name: name.into(),
            value: None,
            key_value: false,
        }
    }

    /// A flag with a value, rendered as the two tokens `-name value`.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Opt {
        Opt {
            name: name.into(),
            value: Some(value.into()),
            key_value: false,
        }
    }

    /// A key=value setting, rendered as the single token `name=value`
    /// without a leading dash.
    pub fn setting(name: impl Into<String>, value: impl Into<String>) -> Opt {
        Opt {
            name: name.into(),
            value: Some(value.into()),
            key_value: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether this option renders in the dashless `name=value` form.
    pub fn is_key_value(&self) -> bool {
        self.key_value
    }
}

impl Commandable for Opt {
    fn arguments(&self) -> Vec<String> {
        if self.key_value {
            let value = self.value.as_deref().unwrap_or_default();
            return vec![format!("{}={}", self.name, value)];
        }
        match &self.value {
            Some(value) => vec![format!("-{}", self.name), value.clone()],
            None => vec![format!("-{}", self.name)],
        }
    }
}

fn yes_no(enabled: bool) -> &'static str {
    if enabled {
        "YES"
    } else {
        "NO"
    }
}

/// Constructors for the commonly used xcodebuild options.
impl Opt {
    /// Build the project `name.xcodeproj`. Required when the directory
    /// holds multiple project files.
    pub fn project(name: impl Into<String>) -> Opt {
        Opt::with_value("project", name)
    }

    /// Build the named target.
    pub fn target(name: impl Into<String>) -> Opt {
        Opt::with_value("target", name)
    }

    /// Build all targets in the project.
    pub fn all_targets() -> Opt {
        Opt::flag("allTargets")
    }

    /// Build the workspace `name.xcworkspace`.
    pub fn workspace(name: impl Into<String>) -> Opt {
        Opt::with_value("workspace", name)
    }

    /// Build the named scheme. Required when building a workspace.
    pub fn scheme(name: impl Into<String>) -> Opt {
        Opt::with_value("scheme", name)
    }

    /// Target the given destination. The destination renders as its
    /// single-quoted specifier token.
    pub fn destination(destination: &Destination) -> Opt {
        Opt::with_value("destination", destination.command())
    }

    /// Wait this many seconds when searching for a destination device
    /// before considering it unavailable. The tool's default is 30.
    pub fn destination_timeout(seconds: f64) -> Opt {
        Opt::with_value("destination-timeout", seconds.to_string())
    }

    /// Use the named build configuration.
    pub fn configuration(name: impl Into<String>) -> Opt {
        Opt::with_value("configuration", name)
    }

    /// Build each target for the given architecture.
    pub fn arch(arch: Architecture) -> Opt {
        Opt::with_value("arch", arch.as_str())
    }

    /// Build against the given SDK, by canonical name or absolute path.
    pub fn sdk(path_or_name: impl Into<String>) -> Opt {
        Opt::with_value("sdk", path_or_name)
    }

    /// Use the given toolchain, by identifier or name.
    pub fn toolchain(identifier_or_name: impl Into<String>) -> Opt {
        Opt::with_value("toolchain", identifier_or_name)
    }

    /// Load build settings from the given xcconfig file; these override
    /// everything else, including command-line settings.
    pub fn xcconfig(filename: impl Into<String>) -> Opt {
        Opt::with_value("xcconfig", filename)
    }

    /// Test-run parameters file for the test-without-building action.
    pub fn xctestrun(path: impl Into<String>) -> Opt {
        Opt::with_value("xctestrun", path)
    }

    /// Override the derived data folder for the scheme's actions.
    pub fn derived_data_path(path: impl Into<String>) -> Opt {
        Opt::with_value("derivedDataPath", path)
    }

    /// Write a result bundle to the given path.
    pub fn result_bundle_path(path: impl Into<String>) -> Opt {
        Opt::with_value("resultBundlePath", path)
    }

    /// Skip the test identifier `TestTarget[/TestClass[/TestMethod]]`.
    pub fn skip_testing(identifier: impl Into<String>) -> Opt {
        Opt::with_value("skip-testing", identifier)
    }

    /// Run only the test identifier; takes precedence over skip-testing.
    pub fn only_testing(identifier: impl Into<String>) -> Opt {
        Opt::with_value("only-testing", identifier)
    }

    /// Toggle code coverage during testing.
    pub fn enable_code_coverage(enabled: bool) -> Opt {
        Opt::with_value("enableCodeCoverage", yes_no(enabled))
    }

    /// Toggle the address sanitizer for the launch action.
    pub fn enable_address_sanitizer(enabled: bool) -> Opt {
        Opt::with_value("enableAddressSanitizer", yes_no(enabled))
    }

    /// Toggle the thread sanitizer for the launch action.
    pub fn enable_thread_sanitizer(enabled: bool) -> Opt {
        Opt::with_value("enableThreadSanitizer", yes_no(enabled))
    }

    /// List the targets and configurations of a project, or the schemes of
    /// a workspace, without building.
    pub fn list() -> Opt {
        Opt::flag("list")
    }

    /// Emit machine-readable JSON output where supported.
    pub fn json() -> Opt {
        Opt::flag("json")
    }

    /// List the build settings of a project or workspace and scheme.
    pub fn show_build_settings() -> Opt {
        Opt::flag("showBuildSettings")
    }

    /// List the SDKs this Xcode knows about.
    pub fn show_sdks() -> Opt {
        Opt::flag("showsdks")
    }

    /// Print the commands that would run without executing them.
    pub fn dry_run() -> Opt {
        Opt::flag("dry-run")
    }

    /// Print nothing but warnings and errors.
    pub fn quiet() -> Opt {
        Opt::flag("quiet")
    }

    /// Provide additional status output.
    pub fn verbose() -> Opt {
        Opt::flag("verbose")
    }

    /// Display version information without building.
    pub fn version() -> Opt {
        Opt::flag("version")
    }

    /// Display usage information.
    pub fn usage() -> Opt {
        Opt::flag("usage")
    }

    /// Skip actions that cannot be performed instead of failing. Honored
    /// only when a scheme is passed.
    pub fn skip_unavailable_actions() -> Opt {
        Opt::flag("skipUnavailableActions")
    }

    /// Override the build setting `key` with `value`.
    pub fn build_setting(key: impl Into<String>, value: impl Into<String>) -> Opt {
        Opt::setting(key, value)
    }

    /// Set the user default `key` to `value`.
    pub fn user_default(key: impl Into<String>, value: impl Into<String>) -> Opt {
        Opt::setting(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_renders_single_dashed_token() {
        let opt = Opt::quiet();
        assert_eq!(opt.arguments(), vec!["-quiet"]);
        assert_eq!(opt.command(), "-quiet");
    }

    #[test]
    fn test_valued_option_renders_two_tokens() {
        let opt = Opt::project("XcodeBuildKit");
        assert_eq!(opt.arguments(), vec!["-project", "XcodeBuildKit"]);
        assert_eq!(opt.command(), "-project XcodeBuildKit");
    }

    #[test]
    fn test_setting_renders_dashless_single_token() {
        let opt = Opt::build_setting("ONLY_ACTIVE_ARCH", "NO");
        assert!(opt.is_key_value());
        assert_eq!(opt.arguments(), vec!["ONLY_ACTIVE_ARCH=NO"]);
        assert_eq!(opt.command(), "ONLY_ACTIVE_ARCH=NO");
    }

    #[test]
    fn test_command_is_space_joined_arguments() {
        let opts = [
            Opt::scheme("MyApp"),
            Opt::dry_run(),
            Opt::user_default("IDEBuildOperationMaxNumberOfConcurrentCompileTasks", "4"),
            Opt::destination_timeout(30.0),
        ];
        for opt in opts {
            assert_eq!(opt.command(), opt.arguments().join(" "));
        }
    }

    #[test]
    fn test_boolean_options_render_yes_no() {
        assert_eq!(
            Opt::enable_code_coverage(true).arguments(),
            vec!["-enableCodeCoverage", "YES"]
        );
        assert_eq!(
            Opt::enable_code_coverage(false).arguments(),
            vec!["-enableCodeCoverage", "NO"]
        );
    }

    #[test]
    fn test_destination_option_embeds_specifier() {
        let dest = Destination::ios(Some("iPhone 6"), None).unwrap();
        let opt = Opt::destination(&dest);
        assert_eq!(
            opt.arguments(),
            vec!["-destination", "'platform=iOS,name=iPhone 6'"]
        );
    }

    #[test]
    fn test_value_contents_are_not_escaped() {
        let opt = Opt::scheme("My App (Beta)");
        assert_eq!(opt.arguments(), vec!["-scheme", "My App (Beta)"]);
    }
}
