use serde::Deserialize;
use std::path::PathBuf;

/// Default input directory, relative to the working directory.
pub const DEFAULT_BIN_DIR: &str = "bin";

/// Default load-path reference to replace.
pub const DEFAULT_OLD_REFERENCE: &str = "@rpath/libfftw3.3.dylib";

/// Default library-path editing tool.
pub const DEFAULT_EDIT_TOOL: &str = "install_name_tool";

/// Default link-dependency inspection tool.
pub const DEFAULT_INSPECT_TOOL: &str = "otool";

/// Configuration from a `.fix-rpath.toml` file.
///
/// Every key is optional; unset keys fall through to the next file in the
/// cascade and finally to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// If true, stop walking up the directory tree at this file.
	#[serde(default)]
	pub root: bool,

	/// Directory whose entries are rewritten.
	pub bin_dir: Option<PathBuf>,

	/// Load-path reference to replace, e.g. `@rpath/libfoo.dylib`.
	pub old_reference: Option<String>,

	/// Absolute path of the replacement library.
	pub new_path: Option<String>,

	/// Library-path editing tool.
	pub edit_tool: Option<String>,

	/// Link-dependency inspection tool.
	pub inspect_tool: Option<String>,

	/// Regex matched against entry file names; non-matching entries are skipped.
	pub include_pattern: Option<String>,

	/// Exit non-zero when any entry is not linked to the new path.
	#[serde(default)]
	pub strict: bool,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Effective values after merging the cascade. First file to set a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfig {
	pub bin_dir: Option<PathBuf>,
	pub old_reference: Option<String>,
	pub new_path: Option<String>,
	pub edit_tool: Option<String>,
	pub inspect_tool: Option<String>,
	pub include_pattern: Option<String>,
	pub strict: bool,
}

impl Config {
	/// Reject values that can never produce a working command.
	pub fn validate(&self) -> Result<(), crate::error::FixRpathError> {
		let string_fields = [
			("old-reference", self.old_reference.as_deref()),
			("new-path", self.new_path.as_deref()),
			("edit-tool", self.edit_tool.as_deref()),
			("inspect-tool", self.inspect_tool.as_deref()),
		];

		for (key, value) in string_fields {
			if value.is_some_and(|v| v.trim().is_empty()) {
				return Err(crate::error::FixRpathError::EmptyValue {
					key: key.to_string(),
				});
			}
		}

		if let Some(ref pattern) = self.include_pattern {
			regex::Regex::new(pattern).map_err(|source| {
				crate::error::FixRpathError::InvalidRegex {
					pattern: pattern.clone(),
					source,
				}
			})?;
		}

		Ok(())
	}
}
