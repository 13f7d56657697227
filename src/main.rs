//! xcb - xcodebuild invocation CLI
//!
//! Entry point for the `xcb` command-line tool: discover and list the
//! project in a directory, or assemble and run an xcodebuild invocation.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use xcodebuild_kit::{
    Action, ActionSet, Commandable, Config, Destination, Opt, Project, Xcodebuild,
};

#[derive(Parser)]
#[command(name = "xcb")]
#[command(about = "Typed xcodebuild invocations", version)]
struct Cli {
    /// Path to config file (default: .xcb.toml in the working directory)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover the project in a directory and print its summary
    List {
        /// Directory to search (default: current directory)
        #[arg(long, short = 'C')]
        path: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Assemble an xcodebuild invocation and run it
    Run {
        /// Actions to perform (build, test, clean, ...)
        #[arg(value_parser = parse_action, required = true)]
        actions: Vec<Action>,

        /// Directory to run in (default: current directory)
        #[arg(long, short = 'C')]
        path: Option<PathBuf>,

        /// Scheme to build
        #[arg(long)]
        scheme: Option<String>,

        /// Project file to build (name.xcodeproj)
        #[arg(long)]
        project: Option<String>,

        /// Workspace to build (name.xcworkspace)
        #[arg(long)]
        workspace: Option<String>,

        /// Build configuration name
        #[arg(long)]
        configuration: Option<String>,

        /// SDK name or path
        #[arg(long)]
        sdk: Option<String>,

        /// Destination preset: "macos" or a simulator device name
        #[arg(long)]
        destination: Option<String>,

        /// Print the assembled command without executing it
        #[arg(long)]
        dry_run: bool,

        /// Build settings as KEY=VALUE (after --)
        #[arg(last = true)]
        settings: Vec<String>,
    },
}

fn parse_action(s: &str) -> Result<Action, String> {
    match s {
        "clean" => Ok(Action::Clean),
        "build" => Ok(Action::Build),
        "test" => Ok(Action::Test),
        "install" => Ok(Action::Install),
        "install-src" => Ok(Action::InstallSrc),
        "analyze" => Ok(Action::Analyze),
        "archive" => Ok(Action::Archive),
        "build-for-testing" => Ok(Action::BuildForTesting),
        "test-without-building" => Ok(Action::TestWithoutBuilding),
        other => Err(format!("unknown action: {}", other)),
    }
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(xcodebuild_kit::config::CONFIG_FILE));
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::List { path, json } => run_list(&config, path, json),
        Commands::Run {
            actions,
            path,
            scheme,
            project,
            workspace,
            configuration,
            sdk,
            destination,
            dry_run,
            settings,
        } => {
            let opts = RunOpts {
                scheme,
                project,
                workspace,
                configuration,
                sdk,
                destination,
                dry_run,
                settings,
            };
            run_build(&config, actions, path, opts)
        }
    }
}

fn working_dir(config: &Config, path: Option<PathBuf>) -> PathBuf {
    path.or_else(|| config.working_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn run_list(config: &Config, path: Option<PathBuf>, json: bool) {
    let dir = working_dir(config, path);
    let project = match Project::discover(&dir) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&project) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("Project: {}", project.name);
        print_section("Targets", &project.targets);
        print_section("Schemes", &project.schemes);
        print_section("Configurations", &project.configurations);
    }
}

fn print_section(title: &str, items: &[String]) {
    println!("{}:", title);
    for item in items {
        println!("    {}", item);
    }
}

struct RunOpts {
    scheme: Option<String>,
    project: Option<String>,
    workspace: Option<String>,
    configuration: Option<String>,
    sdk: Option<String>,
    destination: Option<String>,
    dry_run: bool,
    settings: Vec<String>,
}

fn run_build(config: &Config, actions: Vec<Action>, path: Option<PathBuf>, opts: RunOpts) {
    let mut build = Xcodebuild::with_program(&config.tool)
        .actions(actions.into_iter().collect::<ActionSet>());

    if let Some(name) = opts.project {
        build = build.option(Opt::project(name));
    }
    if let Some(name) = opts.workspace {
        build = build.option(Opt::workspace(name));
    }
    if let Some(name) = opts.scheme {
        build = build.option(Opt::scheme(name));
    }
    if let Some(name) = opts.configuration {
        build = build.option(Opt::configuration(name));
    }
    if let Some(name) = opts.sdk {
        build = build.option(Opt::sdk(name));
    }
    if let Some(spec) = opts.destination {
        let dest = match parse_destination(&spec) {
            Ok(dest) => dest,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        build = build.option(Opt::destination(&dest));
    }
    if let Some(seconds) = config.destination_timeout {
        build = build.option(Opt::destination_timeout(seconds));
    }
    for setting in &opts.settings {
        match setting.split_once('=') {
            Some((key, value)) => build = build.option(Opt::build_setting(key, value)),
            None => {
                eprintln!("Error: build setting must be KEY=VALUE: {}", setting);
                process::exit(1);
            }
        }
    }

    if opts.dry_run {
        println!("{}", build.command());
        process::exit(0);
    }

    let dir = working_dir(config, path);
    match build.launch(Some(&dir)) {
        Ok(result) => {
            print!("{}", result.stdout_lossy());
            let _ = io::stdout().flush();
            process::exit(result.exit_code);
        }
        Err(e) => {
            eprintln!("Error running {}: {}", config.tool, e);
            process::exit(1);
        }
    }
}

/// Map the CLI's `--destination` shorthand onto a destination value:
/// `macos` targets the local Mac, anything else names a simulator device
/// running the latest OS.
fn parse_destination(spec: &str) -> Result<Destination, xcodebuild_kit::DestinationError> {
    if spec.eq_ignore_ascii_case("macos") {
        Ok(Destination::mac_os())
    } else {
        Destination::ios_simulator(Some(spec), None, None)
    }
}
