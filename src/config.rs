//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

static CUSTOM_DB: OnceLock<PathBuf> = OnceLock::new();

// === Storage ===
pub const DB_FILE: &str = "video_files.db";
pub const DB_ENV: &str = "VIDSIFT_DB";
pub const VIDEO_TABLE: &str = "video_files";
pub const DEVICE_TABLE: &str = "devices";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// === File Extensions ===
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm"];

// === Export ===
pub const DEFAULT_EXPORT_CSV: &str = "output_videos_list.csv";
pub const DEFAULT_EXPORT_JSON: &str = "output_videos_list.json";

// === Edit Distance ===
pub const DEFAULT_MAX_DIST: f64 = 3.0;
pub const DEFAULT_MIN_POINTS: usize = 1;

// === TF-IDF / k-means ===
pub const DEFAULT_K: usize = 10;
pub const DEFAULT_SEED: u64 = 42;
pub const KMEANS_MAX_ITER: usize = 300;
pub const NGRAM_MIN: usize = 2;
pub const NGRAM_MAX: usize = 5;

// === Shingle Overlap ===
pub const DEFAULT_THRESHOLD: f64 = 0.4;
pub const SHINGLE_LEN: usize = 3;

// === Display ===
pub const DEFAULT_PREVIEW: usize = 10;

pub fn set_db_path(path: PathBuf) {
    let _ = CUSTOM_DB.set(path);
}

/// Database location (--db flag, then VIDSIFT_DB, then ./video_files.db)
pub fn db_path() -> PathBuf {
    if let Some(custom) = CUSTOM_DB.get() {
        crate::ui::debug(&format!("Using database: {}", custom.display()));
        return custom.clone();
    }

    if let Ok(env_path) = std::env::var(DB_ENV) {
        if !env_path.trim().is_empty() {
            crate::ui::debug(&format!("Using {}: {}", DB_ENV, env_path));
            return PathBuf::from(env_path);
        }
    }

    PathBuf::from(DB_FILE)
}
