//! Volume lookup for scanned folders

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sysinfo::Disks;

use super::scan::{device_id, partition_of};
use crate::core::DeviceRecord;
use crate::ui;

/// Describe the volume holding `folder`, stamped with the current time
pub fn probe(folder: &Path) -> Result<DeviceRecord> {
	let metadata = fs::metadata(folder)
		.with_context(|| format!("The folder '{}' does not exist.", folder.display()))?;

	let disks = Disks::new_with_refreshed_list();
	let volume = disks
		.list()
		.iter()
		.filter(|d| folder.starts_with(d.mount_point()))
		.max_by_key(|d| d.mount_point().as_os_str().len());

	let (partition, volume_name, total_space, available_space) = match volume {
		Some(disk) => {
			let name = disk.name().to_string_lossy().into_owned();
			let mount = disk.mount_point().to_string_lossy().into_owned();
			let label = match partition_of(folder) {
				drive if !drive.is_empty() => drive,
				_ => mount,
			};
			ui::debug(&format!("{} is on volume {} ({})", folder.display(), label, name));
			(label, name, disk.total_space(), disk.available_space())
		}
		None => {
			ui::warn(&format!(
				"Unable to retrieve volume information for {}, using Unknown",
				folder.display()
			));
			(partition_of(folder), "Unknown".to_string(), 0, 0)
		}
	};

	Ok(DeviceRecord {
		device_id: device_id(&metadata),
		partition,
		path: folder.to_string_lossy().into_owned(),
		volume_name,
		last_scanned: super::scan::format_time(std::time::SystemTime::now()),
		total_space,
		available_space,
	})
}
