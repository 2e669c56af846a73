//! Directory scanning for video files

use std::fs::{self, Metadata};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::DATE_FORMAT;
use crate::core::{is_video, normalize_filename, VideoRecord};
use crate::ui;

fn is_excluded(path: &Path, patterns: &[String]) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    patterns
        .iter()
        .filter(|p| !p.trim().is_empty())
        .any(|pattern| path_str.contains(&pattern.to_lowercase()))
}

pub struct ScanResult {
    pub videos: Vec<VideoRecord>,
    /// Excluded by pattern
    pub filtered: usize,
    /// Entries that could not be read or stat'ed
    pub errors: usize,
}

/// Walk `root` recursively and describe every video file found
pub fn scan_directory(root: &Path, exclude_patterns: &[String]) -> Result<ScanResult> {
    if !root.is_dir() {
        bail!("The folder '{}' does not exist.", root.display());
    }

    let mut candidates = Vec::new();
    let mut filtered = 0;
    let mut errors = 0;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                ui::warn(&format!("Error accessing entry: {}", e));
                errors += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_video(entry.path()) {
            continue;
        }

        if is_excluded(entry.path(), exclude_patterns) {
            ui::debug(&format!("Excluded: {}", entry.path().display()));
            filtered += 1;
            continue;
        }

        candidates.push(entry.into_path());
    }

    let described: Vec<Result<VideoRecord>> = candidates.par_iter().map(|path| describe(path)).collect();

    let mut videos = Vec::with_capacity(described.len());
    for result in described {
        match result {
            Ok(record) => videos.push(record),
            Err(e) => {
                ui::warn(&format!("{:#}", e));
                errors += 1;
            }
        }
    }

    Ok(ScanResult {
        videos,
        filtered,
        errors,
    })
}

/// Stat one file into a record
pub fn describe(path: &Path) -> Result<VideoRecord> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Error accessing file '{}'", path.display()))?;

    let modified = metadata
        .modified()
        .with_context(|| format!("No modification time for '{}'", path.display()))?;
    let created = metadata.created().unwrap_or(modified);

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(VideoRecord {
        partition: partition_of(path),
        full_path: path.to_string_lossy().into_owned(),
        normalized_filename: normalize_filename(&filename),
        filename,
        file_size: metadata.len(),
        created: format_time(created),
        modified: format_time(modified),
        device_id: device_id(&metadata),
    })
}

/// Drive prefix on Windows (`C:`), empty elsewhere
pub fn partition_of(path: &Path) -> String {
    match path.components().next() {
        Some(Component::Prefix(prefix)) => prefix.as_os_str().to_string_lossy().into_owned(),
        _ => String::new(),
    }
}

pub fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(DATE_FORMAT).to_string()
}

#[cfg(unix)]
pub fn device_id(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.dev()
}

#[cfg(not(unix))]
pub fn device_id(_metadata: &Metadata) -> u64 {
    0
}

/// Canonical form of a user-supplied folder, falling back to the input
pub fn resolve_root(dir: &Path) -> PathBuf {
    let trimmed = dir.to_string_lossy();
    let unquoted = trimmed.trim().trim_matches(|c| c == '"' || c == '\'');
    let path = PathBuf::from(unquoted);
    path.canonicalize().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str, bytes: usize) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![0u8; bytes]).unwrap();
    }

    #[test]
    fn finds_videos_recursively() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a/Movie.One.mkv", 10);
        touch(tmp.path(), "a/b/clip.MP4", 20);
        touch(tmp.path(), "poster.jpg", 5);

        let scan = scan_directory(tmp.path(), &[]).unwrap();
        let mut names: Vec<_> = scan.videos.iter().map(|v| v.filename.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["Movie.One.mkv", "clip.MP4"]);
        assert_eq!(scan.errors, 0);

        let movie = scan.videos.iter().find(|v| v.filename == "Movie.One.mkv").unwrap();
        assert_eq!(movie.normalized_filename, "Movie One.mkv");
        assert_eq!(movie.file_size, 10);
        assert_eq!(movie.modified.len(), 19);
    }

    #[test]
    fn exclude_patterns_are_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "keep.mp4", 1);
        touch(tmp.path(), "Trailers/skip.mp4", 1);

        let scan = scan_directory(tmp.path(), &["trailers".to_string()]).unwrap();
        assert_eq!(scan.videos.len(), 1);
        assert_eq!(scan.filtered, 1);
    }

    #[test]
    fn missing_folder_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = scan_directory(&tmp.path().join("nope"), &[]).err().unwrap();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn files_on_one_disk_share_a_device() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "x.avi", 1);
        touch(tmp.path(), "y.avi", 1);
        let scan = scan_directory(tmp.path(), &[]).unwrap();
        assert_eq!(scan.videos[0].device_id, scan.videos[1].device_id);
    }

    #[test]
    fn resolve_root_strips_quotes() {
        let tmp = TempDir::new().unwrap();
        let quoted = PathBuf::from(format!("\"{}\"", tmp.path().display()));
        assert_eq!(resolve_root(&quoted), tmp.path().canonicalize().unwrap());
    }
}
