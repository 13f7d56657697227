//! Blocking child-process execution with captured stdout
//!
//! Resolves an executable name against the current directory and `PATH`,
//! launches it, and drains its stdout before returning. A non-zero exit
//! code is reported in [`RunResult`], not raised as an error: callers
//! decide what a failing tool means. Only resolution and spawn failures
//! surface as `io::Error`.
//!
//! No timeout is enforced at this layer; the `-destination-timeout` option
//! is the build tool's own cancellation lever.

use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured result of one child-process run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Raw bytes of the child's stdout. UTF-8 decoding is the caller's
    /// concern so that decode failures can carry a precise error.
    pub stdout: Vec<u8>,
    /// The child's exit code; `-1` when terminated by a signal.
    pub exit_code: i32,
}

impl RunResult {
    /// Lossy text view of the captured output, for diagnostics.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// The execution seam: anything that can run a program and capture its
/// output. Production code uses [`SystemRunner`]; tests substitute a stub.
pub trait ToolRunner {
    fn run(
        &self,
        program: &str,
        arguments: &[String],
        working_dir: Option<&Path>,
    ) -> io::Result<RunResult>;
}

/// Runs programs as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        arguments: &[String],
        working_dir: Option<&Path>,
    ) -> io::Result<RunResult> {
        run(program, arguments, working_dir)
    }
}

/// Resolve `name` to an executable path.
///
/// Absolute paths are checked directly. Otherwise the current working
/// directory is searched first, then each `PATH` entry in order; the first
/// candidate that is an executable file wins.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.is_absolute() {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let mut dirs = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(path) = env::var_os("PATH") {
        dirs.extend(env::split_paths(&path));
    }
    dirs.into_iter()
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Run `program` with `arguments`, blocking until it exits.
///
/// Stdout is piped and fully drained before the child is reaped; stderr is
/// inherited, so callers must not depend on its content. No stdin is
/// supplied.
pub fn run(
    program: &str,
    arguments: &[String],
    working_dir: Option<&Path>,
) -> io::Result<RunResult> {
    let executable = find_executable(program).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("executable not found: {}", program),
        )
    })?;

    let mut command = Command::new(executable);
    command
        .args(arguments)
        .stdin(Stdio::null())
        .stdout(Stdio::piped());
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }

    let mut child = command.spawn()?;
    let mut stdout = Vec::new();
    if let Some(mut pipe) = child.stdout.take() {
        // Drain before waiting so a chatty child cannot deadlock on a full
        // pipe buffer.
        pipe.read_to_end(&mut stdout)?;
    }
    let status = child.wait()?;

    Ok(RunResult {
        stdout,
        exit_code: status.code().unwrap_or(-1),
    })
}
