use crate::config::types::{
	DEFAULT_BIN_DIR, DEFAULT_EDIT_TOOL, DEFAULT_INSPECT_TOOL, DEFAULT_OLD_REFERENCE, MergedConfig,
};
use crate::error::{FixRpathError, Result};
use regex::Regex;
use std::path::PathBuf;

/// Values given on the command line (or through their environment variables).
/// Anything set here takes precedence over the config cascade.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub bin_dir: Option<PathBuf>,
	pub old_reference: Option<String>,
	pub new_path: Option<String>,
	pub edit_tool: Option<String>,
	pub inspect_tool: Option<String>,
	pub include_pattern: Option<String>,
	pub strict: bool,
}

/// Fully resolved settings for one sweep.
#[derive(Debug, Clone)]
pub struct Settings {
	/// Directory whose entries are rewritten, relative to the working directory.
	pub bin_dir: PathBuf,

	/// Reference to replace.
	pub old_reference: String,

	/// Replacement library path.
	pub new_path: String,

	/// Library-path editing tool.
	pub edit_tool: String,

	/// Link-dependency inspection tool.
	pub inspect_tool: String,

	/// Optional file-name filter.
	pub include: Option<Regex>,

	/// Treat any non-linked entry as a failure.
	pub strict: bool,
}

impl Settings {
	/// Resolve settings from CLI overrides, the merged config and built-in defaults.
	///
	/// Fails with [`FixRpathError::MissingNewPath`] when no source sets the
	/// replacement path; there is deliberately no default for it.
	pub fn resolve(overrides: &Overrides, merged: &MergedConfig) -> Result<Self> {
		let new_path = non_empty(
			"new-path",
			overrides.new_path.clone().or_else(|| merged.new_path.clone()),
		)?
		.ok_or(FixRpathError::MissingNewPath)?;

		let old_reference = non_empty(
			"old-reference",
			overrides
				.old_reference
				.clone()
				.or_else(|| merged.old_reference.clone()),
		)?
		.unwrap_or_else(|| DEFAULT_OLD_REFERENCE.to_string());

		let edit_tool = non_empty(
			"edit-tool",
			overrides.edit_tool.clone().or_else(|| merged.edit_tool.clone()),
		)?
		.unwrap_or_else(|| DEFAULT_EDIT_TOOL.to_string());

		let inspect_tool = non_empty(
			"inspect-tool",
			overrides
				.inspect_tool
				.clone()
				.or_else(|| merged.inspect_tool.clone()),
		)?
		.unwrap_or_else(|| DEFAULT_INSPECT_TOOL.to_string());

		let bin_dir = overrides
			.bin_dir
			.clone()
			.or_else(|| merged.bin_dir.clone())
			.unwrap_or_else(|| PathBuf::from(DEFAULT_BIN_DIR));

		let include = overrides
			.include_pattern
			.as_ref()
			.or(merged.include_pattern.as_ref())
			.map(|pattern| {
				Regex::new(pattern).map_err(|source| FixRpathError::InvalidRegex {
					pattern: pattern.clone(),
					source,
				})
			})
			.transpose()?;

		Ok(Settings {
			bin_dir,
			old_reference,
			new_path,
			edit_tool,
			inspect_tool,
			include,
			strict: overrides.strict || merged.strict,
		})
	}
}

fn non_empty(key: &str, value: Option<String>) -> Result<Option<String>> {
	match value {
		Some(v) if v.trim().is_empty() => Err(FixRpathError::EmptyValue {
			key: key.to_string(),
		}),
		other => Ok(other),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_new_path_fails() {
		let result = Settings::resolve(&Overrides::default(), &MergedConfig::default());
		assert!(matches!(result, Err(FixRpathError::MissingNewPath)));
	}

	#[test]
	fn test_defaults_applied() {
		let merged = MergedConfig {
			new_path: Some("/opt/lib/libfftw3.3.dylib".to_string()),
			..Default::default()
		};
		let settings = Settings::resolve(&Overrides::default(), &merged).unwrap();

		assert_eq!(settings.bin_dir, PathBuf::from("bin"));
		assert_eq!(settings.old_reference, "@rpath/libfftw3.3.dylib");
		assert_eq!(settings.edit_tool, "install_name_tool");
		assert_eq!(settings.inspect_tool, "otool");
		assert!(settings.include.is_none());
		assert!(!settings.strict);
	}

	#[test]
	fn test_overrides_take_precedence() {
		let merged = MergedConfig {
			new_path: Some("/config/lib.dylib".to_string()),
			bin_dir: Some(PathBuf::from("config-bin")),
			include_pattern: Some("^config".to_string()),
			strict: true,
			..Default::default()
		};
		let overrides = Overrides {
			new_path: Some("/cli/lib.dylib".to_string()),
			bin_dir: Some(PathBuf::from("cli-bin")),
			include_pattern: Some("^cli".to_string()),
			..Default::default()
		};
		let settings = Settings::resolve(&overrides, &merged).unwrap();

		assert_eq!(settings.new_path, "/cli/lib.dylib");
		assert_eq!(settings.bin_dir, PathBuf::from("cli-bin"));
		assert!(settings.include.unwrap().is_match("cli-tool"));
		assert!(settings.strict);
	}

	#[test]
	fn test_empty_override_rejected() {
		let overrides = Overrides {
			new_path: Some(String::new()),
			..Default::default()
		};
		let result = Settings::resolve(&overrides, &MergedConfig::default());

		match result.unwrap_err() {
			FixRpathError::EmptyValue { key } => assert_eq!(key, "new-path"),
			other => panic!("Expected EmptyValue error, got {other:?}"),
		}
	}

	#[test]
	fn test_invalid_override_pattern() {
		let overrides = Overrides {
			new_path: Some("/opt/lib.dylib".to_string()),
			include_pattern: Some("(".to_string()),
			..Default::default()
		};
		let result = Settings::resolve(&overrides, &MergedConfig::default());
		assert!(matches!(result, Err(FixRpathError::InvalidRegex { .. })));
	}
}
