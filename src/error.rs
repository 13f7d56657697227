//! Crate-wide error type
//!
//! One variant per failure kind the pipeline can surface. Every component
//! stops at the first error; nothing here is retried, and no partial value
//! ever accompanies an error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::destination::DestinationError;

/// Errors from building and running xcodebuild invocations.
#[derive(Debug, Error)]
pub enum Error {
    /// An under-specified destination was requested.
    #[error(transparent)]
    Destination(#[from] DestinationError),

    /// No `.xcodeproj` found during discovery.
    #[error("no .xcodeproj file found in {}", .path.display())]
    NoProjectFile { path: PathBuf },

    /// More than one `.xcodeproj` found; the caller must pick one with
    /// `-project` rather than have discovery guess.
    #[error("multiple .xcodeproj files found in {}; specify one with -project", .path.display())]
    MultipleProjectFiles { path: PathBuf },

    /// The tool exited non-zero. Carries the captured output verbatim as
    /// the only diagnostic available.
    #[error("xcodebuild exited with code {exit_code}:\n{output}")]
    CommandFailed { exit_code: i32, output: String },

    /// The captured output was not valid UTF-8.
    #[error("xcodebuild output is not valid UTF-8")]
    OutputNotUtf8,

    /// The captured text did not decode as the expected JSON shape.
    #[error("failed to decode xcodebuild JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or process-spawn failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}
