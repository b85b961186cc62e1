//! Load-path rewriting commands and dependency report parsing.
//!
//! This module handles:
//! - Building the edit and inspect tool invocations
//! - Parsing `otool -L` style reports into install names
//! - Deciding whether a rewrite took effect

pub mod command;
pub mod report;

pub use command::{EditCommand, InspectCommand};
pub use report::{LinkState, classify, parse_dependencies};
