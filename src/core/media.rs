//! Video file detection and filename normalization

use std::path::Path;
use crate::config::VIDEO_EXTENSIONS;

/// True when the path carries one of the known video extensions
pub fn is_video(path: &Path) -> bool {
	path.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|ext| VIDEO_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(ext)))
}

/// Turn every run of punctuation in the stem into one space, keep the extension.
///
/// `"My.Movie_(2020).mkv"` becomes `"My Movie 2020.mkv"`.
pub fn normalize_filename(filename: &str) -> String {
	let path = Path::new(filename);
	let (stem, ext) = match (path.file_stem().and_then(|s| s.to_str()), path.extension().and_then(|e| e.to_str())) {
		(Some(stem), Some(ext)) => (stem, format!(".{}", ext)),
		_ => (filename, String::new()),
	};

	let spaced: String = stem
		.chars()
		.map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
		.collect();

	let mut normalized = spaced.split_whitespace().collect::<Vec<_>>().join(" ");
	normalized.push_str(&ext);
	normalized
}
