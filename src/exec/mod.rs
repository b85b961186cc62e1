//! External tool execution for fix-rpath.
//!
//! This module handles:
//! - Running tools directly (no shell) with captured stdout/stderr
//! - Exit status capture
//! - Locating tools on PATH

use crate::error::{FixRpathError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
	/// Exit code, or `None` if the process was killed by a signal.
	pub exit_code: Option<i32>,

	pub stdout: String,

	pub stderr: String,
}

impl ToolOutput {
	pub fn success(&self) -> bool {
		self.exit_code == Some(0)
	}
}

/// Something that can run an external tool and hand back its output.
pub trait ToolRunner {
	fn run(&self, program: &str, args: &[OsString]) -> Result<ToolOutput>;
}

/// Runs tools as child processes of this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
	fn run(&self, program: &str, args: &[OsString]) -> Result<ToolOutput> {
		tracing::debug!(program, ?args, "running tool");

		let output = Command::new(program).args(args).output().map_err(|source| {
			if source.kind() == std::io::ErrorKind::NotFound {
				FixRpathError::ToolNotFound {
					tool: program.to_string(),
				}
			} else {
				FixRpathError::ToolSpawnError {
					tool: program.to_string(),
					source,
				}
			}
		})?;

		Ok(ToolOutput {
			exit_code: output.status.code(),
			stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
			stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
		})
	}
}

/// Resolve a command name to its full path.
///
/// If the command contains a path separator it is checked as-is.
/// Otherwise, searches PATH for the command.
pub fn resolve_command(command: &str) -> Option<PathBuf> {
	let path = Path::new(command);

	if path.components().count() > 1 || path.is_absolute() {
		return path.is_file().then(|| path.to_path_buf());
	}

	let path_var = std::env::var_os("PATH")?;
	std::env::split_paths(&path_var)
		.map(|dir| dir.join(command))
		.find(|full_path| full_path.is_file())
}
