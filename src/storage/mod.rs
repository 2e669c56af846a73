//! Video index persistence

pub mod index;

pub use index::{UpsertSummary, VideoIndex};

use anyhow::Result;

/// Open the index at the configured location
pub fn open_default() -> Result<VideoIndex> {
	VideoIndex::open(&crate::config::db_path())
}
