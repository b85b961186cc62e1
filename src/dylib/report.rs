use regex::Regex;
use std::sync::LazyLock;

/// One dependency line of `otool -L`:
/// `\t@rpath/libfftw3.3.dylib (compatibility version 9.0.0, current version 9.10.0)`
static DEPENDENCY_LINE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s+(?P<name>\S.*?)\s+\(compatibility version [^,]*, current version [^)]*\)")
		.expect("dependency line pattern is valid")
});

/// Extract the recorded install names from an inspect report.
///
/// The header line (`bin/foo:`) and anything else that isn't a dependency
/// line is ignored.
pub fn parse_dependencies(report: &str) -> Vec<String> {
	report
		.lines()
		.filter_map(|line| DEPENDENCY_LINE.captures(line))
		.map(|caps| caps["name"].to_string())
		.collect()
}

/// What the dependency list says about one rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
	/// The new path is linked and the old reference is gone.
	Linked,
	/// Neither the old reference nor the new path is linked.
	ReferenceAbsent,
	/// The old reference is still listed.
	ReferenceRemains,
}

/// Classify a dependency list against the reference being replaced.
pub fn classify(dependencies: &[String], old_reference: &str, new_path: &str) -> LinkState {
	if dependencies.iter().any(|d| d == old_reference) {
		LinkState::ReferenceRemains
	} else if dependencies.iter().any(|d| d == new_path) {
		LinkState::Linked
	} else {
		LinkState::ReferenceAbsent
	}
}
