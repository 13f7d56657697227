//! Project discovery via `xcodebuild -list -json`
//!
//! Locates the single `.xcodeproj` in a directory, asks xcodebuild to list
//! it in JSON mode, and decodes the result. A directory with zero or
//! several project files is an ambiguity error and never invokes the tool.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::command::{Commandable, Xcodebuild};
use crate::error::Error;
use crate::option::Opt;
use crate::process::{SystemRunner, ToolRunner};

/// Extension that marks an Xcode project bundle.
const PROJECT_SUFFIX: &str = ".xcodeproj";

/// What xcodebuild reports for a project: its name and the targets,
/// schemes, and configurations it contains, in tool order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub targets: Vec<String>,
    pub schemes: Vec<String>,
    pub configurations: Vec<String>,
}

/// The tool nests the project record under a fixed wrapper key.
#[derive(Debug, Deserialize)]
struct ProjectContainer {
    project: Project,
}

impl Project {
    /// Discover the project in `path` by running the real tool.
    pub fn discover(path: &Path) -> Result<Project, Error> {
        Self::discover_with(path, &SystemRunner)
    }

    /// Discover the project in `path`, executing the tool through `runner`.
    ///
    /// The pipeline is linear and stops at the first failure: ambiguity,
    /// tool failure (non-zero exit, output carried verbatim), then UTF-8
    /// and JSON decoding.
    pub fn discover_with(path: &Path, runner: &dyn ToolRunner) -> Result<Project, Error> {
        let count = project_file_count(path)?;
        if count == 0 {
            return Err(Error::NoProjectFile {
                path: path.to_path_buf(),
            });
        }
        if count > 1 {
            return Err(Error::MultipleProjectFiles {
                path: path.to_path_buf(),
            });
        }

        let build = Xcodebuild::new().option(Opt::list()).option(Opt::json());
        let args = build.arguments();
        let result = runner.run(build.program(), &args[1..], Some(path))?;

        if result.exit_code != 0 {
            return Err(Error::CommandFailed {
                exit_code: result.exit_code,
                output: result.stdout_lossy(),
            });
        }

        let text = String::from_utf8(result.stdout).map_err(|_| Error::OutputNotUtf8)?;
        let container: ProjectContainer = serde_json::from_str(&text)?;
        Ok(container.project)
    }
}

/// Count directory entries named `*.xcodeproj`. File contents are never
/// read.
fn project_file_count(path: &Path) -> Result<usize, Error> {
    let mut count = 0;
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().ends_with(PROJECT_SUFFIX) {
            count += 1;
        }
    }
    Ok(count)
}
