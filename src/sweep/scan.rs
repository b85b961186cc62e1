use crate::error::{FixRpathError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// List the entries directly under `dir` that a sweep should process.
///
/// Hidden entries are skipped, like a shell `dir/*` glob. Subdirectories are
/// not filtered out. When `include` is set, only entries whose file name
/// matches it are kept. Paths are `dir.join(name)`, sorted by name.
pub fn list_entries(dir: &Path, include: Option<&Regex>) -> Result<Vec<PathBuf>> {
	let read_dir = std::fs::read_dir(dir).map_err(|source| FixRpathError::InputDirError {
		path: dir.to_path_buf(),
		source,
	})?;

	let mut names = Vec::new();
	for entry in read_dir {
		let entry = entry.map_err(|source| FixRpathError::InputDirError {
			path: dir.to_path_buf(),
			source,
		})?;
		let name = entry.file_name();
		let name_str = name.to_string_lossy();

		if name_str.starts_with('.') {
			continue;
		}
		if let Some(regex) = include
			&& !regex.is_match(&name_str)
		{
			tracing::debug!(entry = %name_str, "skipped by include pattern");
			continue;
		}

		names.push(name);
	}

	names.sort();

	Ok(names.into_iter().map(|name| dir.join(name)).collect())
}
