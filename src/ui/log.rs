//! Unified logging system

use colored::*;
use rand::Rng;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
        _     _      _  __ _
 __   _(_) __| |___ (_)/ _| |_
 \ \ / / |/ _` / __|| | |_| __|
  \ V /| | (_| \__ \| |  _| |_
   \_/ |_|\__,_|___/|_|_|  \__|"#;

const SLOGANS: &[&str] = &[
	"final_final_v2_REAL.mp4",
	"Three copies of the same wedding, found",
	"Levenshtein says hi",
	"Your backup drive called, it wants its space back",
	"Same movie, different underscores",
	"k-means, but for your Downloads folder",
];

pub fn random_slogan() -> &'static str {
	let idx = rand::rng().random_range(0..SLOGANS.len());
	SLOGANS[idx]
}

pub fn print_logo() {
	println!("{}", LOGO.bright_blue().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", format!("─── {} ───", text).bright_blue().bold());
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &Path, max_len: usize) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let filename = path
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string());

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, shorten(&filename, max_len))
}

/// Middle-elide long names on character boundaries
pub fn shorten(name: &str, max_len: usize) -> String {
	let count = name.chars().count();
	if count <= max_len || max_len < 8 {
		return name.to_string();
	}
	let head = max_len / 2;
	let tail = max_len - head - 3;
	let start: String = name.chars().take(head).collect();
	let end: String = name.chars().skip(count - tail).collect();
	format!("{}...{}", start, end)
}

/// Human readable byte count
pub fn format_size(bytes: u64) -> String {
	let mut size = bytes as f64;
	for unit in ["B", "KB", "MB", "GB"] {
		if size < 1024.0 {
			return format!("{:.1} {}", size, unit);
		}
		size /= 1024.0;
	}
	format!("{:.1} TB", size)
}
