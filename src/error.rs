use std::path::PathBuf;

/// Library-level structured errors for fix-rpath.
///
/// Per-entry tool failures are not errors: they are recorded as
/// [`Outcome`](crate::sweep::Outcome) values so the sweep can continue.
#[derive(Debug, thiserror::Error)]
pub enum FixRpathError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid include pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error(
		"No replacement library path configured: pass --new-path, set FIX_RPATH_NEW_PATH, or add new-path to .fix-rpath.toml"
	)]
	MissingNewPath,

	#[error("Empty value for {key}")]
	EmptyValue { key: String },

	#[error("Failed to read input directory: {path}")]
	InputDirError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Tool not found: {tool}")]
	ToolNotFound { tool: String },

	#[error("Failed to run tool: {tool}")]
	ToolSpawnError {
		tool: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write output")]
	OutputError(#[source] std::io::Error),

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using FixRpathError.
pub type Result<T> = std::result::Result<T, FixRpathError>;
