//! Devices command - list scanned volumes

use anyhow::Result;
use colored::*;

use crate::storage;
use crate::ui;

pub fn run() -> Result<()> {
	let index = storage::open_default()?;
	let devices = index.devices()?;

	if devices.is_empty() {
		ui::warn("No devices found. Run 'vidsift scan' first");
		return Ok(());
	}

	ui::header("Devices");
	for device in &devices {
		let videos = index.count_for_device(device.device_id)?;
		println!(
			"\n{} {} {}",
			"Device".bright_white(),
			device.device_id.to_string().bright_cyan(),
			format!("({} videos)", videos).dimmed()
		);
		println!("  {:<16}{}", "Volume".dimmed(), device.volume_name);
		if !device.partition.is_empty() {
			println!("  {:<16}{}", "Partition".dimmed(), device.partition);
		}
		println!("  {:<16}{}", "Last folder".dimmed(), device.path);
		println!("  {:<16}{}", "Last scanned".dimmed(), device.last_scanned);
		println!(
			"  {:<16}{} free of {}",
			"Space".dimmed(),
			ui::format_size(device.available_space),
			ui::format_size(device.total_space)
		);
	}

	Ok(())
}
