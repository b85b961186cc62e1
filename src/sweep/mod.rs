//! The rewrite sweep over an input directory.
//!
//! For every entry the edit command is printed and run, then the inspect
//! command is run and its report printed. Tool failures are recorded per
//! entry and never stop the sweep.

pub mod scan;

pub use scan::list_entries;

use crate::config::Settings;
use crate::dylib::{EditCommand, InspectCommand, LinkState, classify, parse_dependencies};
use crate::error::{FixRpathError, Result};
use crate::exec::{ToolOutput, ToolRunner};
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A tool invocation that could not be run or exited non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
	pub tool: String,

	/// `None` when the tool could not be spawned or was killed by a signal.
	pub exit_code: Option<i32>,

	pub stderr: String,
}

impl ToolFailure {
	fn from_output(tool: &str, output: &ToolOutput) -> Self {
		ToolFailure {
			tool: tool.to_string(),
			exit_code: output.exit_code,
			stderr: output.stderr.clone(),
		}
	}

	fn from_error(tool: &str, error: &FixRpathError) -> Self {
		ToolFailure {
			tool: tool.to_string(),
			exit_code: None,
			stderr: error.to_string(),
		}
	}
}

impl fmt::Display for ToolFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.exit_code {
			Some(code) => write!(f, "{} exited with status {}", self.tool, code)?,
			None => write!(f, "{} did not run to completion", self.tool)?,
		}
		match self.stderr.lines().find(|l| !l.trim().is_empty()) {
			Some(line) => write!(f, ": {}", line.trim()),
			None => Ok(()),
		}
	}
}

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// The new path is recorded in the binary.
	Linked,
	/// The edit ran but the binary never referenced the old path.
	ReferenceAbsent,
	/// The edit reported success yet the old reference is still recorded.
	ReferenceRemains,
	EditFailed(ToolFailure),
	InspectFailed(ToolFailure),
	/// Dry run, nothing executed.
	Planned,
}

impl Outcome {
	pub fn is_linked(&self) -> bool {
		matches!(self, Outcome::Linked)
	}

	/// A tool could not do its job on this entry.
	pub fn is_failure(&self) -> bool {
		matches!(self, Outcome::EditFailed(_) | Outcome::InspectFailed(_))
	}
}

impl From<LinkState> for Outcome {
	fn from(state: LinkState) -> Self {
		match state {
			LinkState::Linked => Outcome::Linked,
			LinkState::ReferenceAbsent => Outcome::ReferenceAbsent,
			LinkState::ReferenceRemains => Outcome::ReferenceRemains,
		}
	}
}

impl fmt::Display for Outcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Outcome::Linked => write!(f, "linked"),
			Outcome::ReferenceAbsent => write!(f, "old reference not found, nothing changed"),
			Outcome::ReferenceRemains => write!(f, "old reference still present after edit"),
			Outcome::EditFailed(failure) => write!(f, "edit failed: {failure}"),
			Outcome::InspectFailed(failure) => write!(f, "inspect failed: {failure}"),
			Outcome::Planned => write!(f, "planned"),
		}
	}
}

/// Result for one processed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
	pub path: PathBuf,
	pub outcome: Outcome,
}

/// Results of a whole sweep, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
	pub entries: Vec<EntryReport>,
}

impl SweepReport {
	fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
		self.entries.iter().filter(|e| pred(&e.outcome)).count()
	}

	/// True when every entry ended up linked. Vacuously true for an empty sweep.
	pub fn all_linked(&self) -> bool {
		self.entries.iter().all(|e| e.outcome.is_linked())
	}

	pub fn failed(&self) -> usize {
		self.count(Outcome::is_failure)
	}

	/// One-line summary for the end of a run.
	pub fn summary(&self) -> String {
		let planned = self.count(|o| matches!(o, Outcome::Planned));
		if planned > 0 {
			return format!("{} {} planned (dry run)", planned, entries_noun(planned));
		}

		format!(
			"{} {}: {} linked, {} without reference, {} unchanged, {} failed",
			self.entries.len(),
			entries_noun(self.entries.len()),
			self.count(Outcome::is_linked),
			self.count(|o| matches!(o, Outcome::ReferenceAbsent)),
			self.count(|o| matches!(o, Outcome::ReferenceRemains)),
			self.failed(),
		)
	}
}

fn entries_noun(count: usize) -> &'static str {
	if count == 1 { "entry" } else { "entries" }
}

type Attempt = std::result::Result<ToolOutput, ToolFailure>;

/// Drives the edit and inspect tools over a list of entries.
pub struct Sweeper<'a, R: ToolRunner + ?Sized> {
	settings: &'a Settings,
	runner: &'a R,
	dry_run: bool,
}

impl<'a, R: ToolRunner + ?Sized> Sweeper<'a, R> {
	pub fn new(settings: &'a Settings, runner: &'a R) -> Self {
		Sweeper {
			settings,
			runner,
			dry_run: false,
		}
	}

	/// Print commands without running them.
	pub fn dry_run(mut self, dry_run: bool) -> Self {
		self.dry_run = dry_run;
		self
	}

	/// Process `entries` in order.
	///
	/// Command strings and inspect reports go to `out`; tool stderr and
	/// per-entry warnings go to `err`. Only a failure to write to either
	/// stream is an error.
	pub fn run<O: Write, E: Write>(
		&self,
		entries: &[PathBuf],
		out: &mut O,
		err: &mut E,
	) -> Result<SweepReport> {
		let mut report = SweepReport::default();

		for path in entries {
			let outcome = self.process_entry(path, out, err)?;

			if !outcome.is_linked() && outcome != Outcome::Planned {
				tracing::info!(path = %path.display(), %outcome, "entry not linked");
				writeln!(err, "warning: {}: {}", path.display(), outcome)
					.map_err(FixRpathError::OutputError)?;
			}

			report.entries.push(EntryReport {
				path: path.clone(),
				outcome,
			});
		}

		Ok(report)
	}

	fn process_entry<O: Write, E: Write>(
		&self,
		path: &Path,
		out: &mut O,
		err: &mut E,
	) -> Result<Outcome> {
		let settings = self.settings;
		let edit = EditCommand::new(
			&settings.edit_tool,
			&settings.old_reference,
			&settings.new_path,
			path,
		);
		let inspect = InspectCommand::new(&settings.inspect_tool, path);

		writeln!(out, "{edit}").map_err(FixRpathError::OutputError)?;

		if self.dry_run {
			writeln!(out, "{inspect}").map_err(FixRpathError::OutputError)?;
			return Ok(Outcome::Planned);
		}
		out.flush().map_err(FixRpathError::OutputError)?;

		let edit_attempt = self.attempt(&edit.tool, &edit.args(), out, err)?;

		// Inspect runs even when the edit failed, so the operator sees the link table.
		let inspect_attempt = self.attempt(&inspect.tool, &inspect.args(), out, err)?;

		let outcome = match (edit_attempt, inspect_attempt) {
			(Err(failure), _) => Outcome::EditFailed(failure),
			(Ok(_), Err(failure)) => Outcome::InspectFailed(failure),
			(Ok(_), Ok(output)) => {
				let dependencies = parse_dependencies(&output.stdout);
				classify(&dependencies, &settings.old_reference, &settings.new_path).into()
			}
		};

		Ok(outcome)
	}

	/// Run one tool, passing its stdout through to `out` and stderr to `err`.
	fn attempt<O: Write, E: Write>(
		&self,
		tool: &str,
		args: &[OsString],
		out: &mut O,
		err: &mut E,
	) -> Result<Attempt> {
		match self.runner.run(tool, args) {
			Ok(output) => {
				out.write_all(output.stdout.as_bytes())
					.map_err(FixRpathError::OutputError)?;
				err.write_all(output.stderr.as_bytes())
					.map_err(FixRpathError::OutputError)?;
				if output.success() {
					Ok(Ok(output))
				} else {
					Ok(Err(ToolFailure::from_output(tool, &output)))
				}
			}
			Err(error) => {
				tracing::debug!(tool, %error, "tool did not run");
				Ok(Err(ToolFailure::from_error(tool, &error)))
			}
		}
	}
}
