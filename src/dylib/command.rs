use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// `<edit-tool> -change "<old>" "<new>" <binary>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
	pub tool: String,
	pub old_reference: String,
	pub new_path: String,
	pub binary: PathBuf,
}

impl EditCommand {
	pub fn new(tool: &str, old_reference: &str, new_path: &str, binary: &Path) -> Self {
		EditCommand {
			tool: tool.to_string(),
			old_reference: old_reference.to_string(),
			new_path: new_path.to_string(),
			binary: binary.to_path_buf(),
		}
	}

	/// Arguments passed to the tool. Quoting only exists in the display form,
	/// and the binary path is passed through byte for byte.
	pub fn args(&self) -> Vec<OsString> {
		vec![
			OsString::from("-change"),
			OsString::from(&self.old_reference),
			OsString::from(&self.new_path),
			self.binary.clone().into_os_string(),
		]
	}
}

impl fmt::Display for EditCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} -change \"{}\" \"{}\" {}",
			self.tool,
			self.old_reference,
			self.new_path,
			self.binary.display()
		)
	}
}

/// `<inspect-tool> -L <binary>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectCommand {
	pub tool: String,
	pub binary: PathBuf,
}

impl InspectCommand {
	pub fn new(tool: &str, binary: &Path) -> Self {
		InspectCommand {
			tool: tool.to_string(),
			binary: binary.to_path_buf(),
		}
	}

	pub fn args(&self) -> Vec<OsString> {
		vec![OsString::from("-L"), self.binary.clone().into_os_string()]
	}
}

impl fmt::Display for InspectCommand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} -L {}", self.tool, self.binary.display())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_edit_command_display_is_exact_concatenation() {
		let cmd = EditCommand::new(
			"install_name_tool",
			"@rpath/libfftw3.3.dylib",
			"/opt/fftw/lib/libfftw3.3.dylib",
			Path::new("bin/foo"),
		);

		assert_eq!(
			cmd.to_string(),
			"install_name_tool -change \"@rpath/libfftw3.3.dylib\" \"/opt/fftw/lib/libfftw3.3.dylib\" bin/foo"
		);
	}

	#[test]
	fn test_edit_command_args_unquoted() {
		let cmd = EditCommand::new(
			"install_name_tool",
			"@rpath/libfoo.dylib",
			"/path with space/libfoo.dylib",
			Path::new("bin/foo"),
		);

		assert_eq!(
			cmd.args(),
			vec![
				"-change",
				"@rpath/libfoo.dylib",
				"/path with space/libfoo.dylib",
				"bin/foo"
			]
		);
	}

	#[test]
	fn test_inspect_command() {
		let cmd = InspectCommand::new("otool", Path::new("bin/foo"));

		assert_eq!(cmd.to_string(), "otool -L bin/foo");
		assert_eq!(cmd.args(), vec!["-L", "bin/foo"]);
	}

	#[cfg(unix)]
	#[test]
	fn test_non_utf8_binary_passed_verbatim() {
		use std::ffi::OsStr;
		use std::os::unix::ffi::OsStrExt;

		let binary = Path::new("bin").join(OsStr::from_bytes(b"geo\xffac"));
		let edit = EditCommand::new("install_name_tool", "@rpath/a.dylib", "/b.dylib", &binary);
		let inspect = InspectCommand::new("otool", &binary);

		assert_eq!(edit.args()[3].as_bytes(), b"bin/geo\xffac");
		assert_eq!(inspect.args()[1].as_bytes(), b"bin/geo\xffac");
		assert_eq!(
			edit.to_string(),
			"install_name_tool -change \"@rpath/a.dylib\" \"/b.dylib\" bin/geo\u{FFFD}ac"
		);
	}
}
