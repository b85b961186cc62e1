//! fix-rpath - rewrite a dynamic-library load path across a directory of binaries.
//!
//! This library provides the core functionality for fix-rpath, including:
//! - Configuration file parsing, cascade discovery and settings resolution
//! - Building `install_name_tool` / `otool` invocations
//! - Parsing dependency reports to tell whether a rewrite took effect
//! - The sweep itself, producing one [`sweep::EntryReport`] per entry
//!
//! # Example
//!
//! ```no_run
//! use fix_rpath::config::{MergedConfig, Overrides, Settings};
//! use fix_rpath::exec::SystemRunner;
//! use fix_rpath::sweep::{Sweeper, list_entries};
//!
//! let overrides = Overrides {
//!     new_path: Some("/opt/fftw/lib/libfftw3.3.dylib".to_string()),
//!     ..Default::default()
//! };
//! let settings = Settings::resolve(&overrides, &MergedConfig::default()).unwrap();
//! let entries = list_entries(&settings.bin_dir, settings.include.as_ref()).unwrap();
//!
//! let report = Sweeper::new(&settings, &SystemRunner)
//!     .run(&entries, &mut std::io::stdout(), &mut std::io::stderr())
//!     .unwrap();
//!
//! for entry in &report.entries {
//!     println!("{}: {}", entry.path.display(), entry.outcome);
//! }
//! ```

pub mod config;
pub mod dylib;
pub mod error;
pub mod exec;
pub mod logging;
pub mod sweep;

pub use error::{FixRpathError, Result};
