//! # Command Implementations
//!
//! Each submodule handles one CLI command (scan, export, cluster, etc.).

pub mod cluster;
pub mod delete;
pub mod devices;
pub mod export;
pub mod scan;

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use crate::ui;

/// Ask a yes/no question on stdin, defaulting to no
pub(crate) fn confirm(question: &str) -> Result<bool> {
	print!("\n{} [y/N]: ", question);
	io::stdout().flush()?;

	let mut input = String::new();
	io::stdin().read_line(&mut input)?;
	Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Write JSON to a file, or to stdout when the path is `-`
pub(crate) fn write_json(json: &str, path: &Path) -> Result<()> {
	if path.to_str() == Some("-") || path.as_os_str().is_empty() {
		println!("{}", json);
	} else {
		std::fs::write(path, json)?;
		ui::success(&format!("Exported to {}", path.display()));
	}
	Ok(())
}
