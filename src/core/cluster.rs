//! Filename cluster report structures

use serde::{Deserialize, Serialize};

/// One group of look-alike filenames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameGroup {
	/// Group ID (assigned after sorting by size)
	pub id: usize,
	pub names: Vec<String>,
}

/// Complete clustering result for a set of names
#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterReport {
	/// vidsift version that created this
	pub version: String,
	/// When clustering was performed
	pub timestamp: String,
	/// Algorithm and parameters, e.g. `edit-distance(max_dist=3)`
	pub method: String,
	pub groups: Vec<NameGroup>,
	pub total_names: usize,
}

impl ClusterReport {
	pub fn new(method: String, mut groups: Vec<Vec<String>>) -> Self {
		let total_names = groups.iter().map(Vec::len).sum();

		// Largest first; stable so equal sizes keep first-appearance order
		groups.sort_by(|a, b| b.len().cmp(&a.len()));

		Self {
			version: env!("CARGO_PKG_VERSION").to_string(),
			timestamp: chrono::Utc::now().to_rfc3339(),
			method,
			groups: groups
				.into_iter()
				.enumerate()
				.map(|(id, names)| NameGroup { id, names })
				.collect(),
			total_names,
		}
	}

	/// Groups holding more than one name
	pub fn shared_groups(&self) -> usize {
		self.groups.iter().filter(|g| g.names.len() > 1).count()
	}

	pub fn singleton_percent(&self) -> f32 {
		if self.total_names == 0 {
			0.0
		} else {
			let singles = self.groups.len() - self.shared_groups();
			(singles as f32 / self.total_names as f32) * 100.0
		}
	}
}
