//! Rows of the video index

use serde::{Deserialize, Serialize};

/// One indexed video file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
	/// Drive prefix or mount point the file lives on
	pub partition: String,
	pub full_path: String,
	pub filename: String,
	pub normalized_filename: String,
	pub file_size: u64,
	pub created: String,
	pub modified: String,
	pub device_id: u64,
}

/// Volume a scanned folder belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
	pub device_id: u64,
	pub partition: String,
	/// Folder that was scanned last on this device
	pub path: String,
	pub volume_name: String,
	pub last_scanned: String,
	pub total_space: u64,
	pub available_space: u64,
}
