//! Scan command - index video files

use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use crate::processing::{self, device, scan::resolve_root};
use crate::storage;
use crate::ui;

pub fn run(dir: &Path, exclude_patterns: &[String]) -> Result<()> {
    let start = Instant::now();
    let root = resolve_root(dir);

    ui::info(&format!("Scanning: {}", ui::path_link(&root, 60)));
    if !exclude_patterns.is_empty() {
        ui::debug(&format!("Exclude patterns: {}", exclude_patterns.join(", ")));
    }

    let scan = processing::scan_directory(&root, exclude_patterns)?;

    ui::success(&format!(
        "Found {} videos ({} filtered, {} errors)",
        scan.videos.len(),
        scan.filtered,
        scan.errors
    ));

    if scan.videos.is_empty() {
        ui::warn("No video files found");
        return Ok(());
    }

    let mut index = storage::open_default()?;
    let device = device::probe(&root)?;
    index.upsert_device(&device)?;
    ui::debug(&format!(
        "Device {} ({}), {} free of {}",
        device.device_id,
        device.volume_name,
        ui::format_size(device.available_space),
        ui::format_size(device.total_space)
    ));

    let summary = index.upsert_videos(&scan.videos)?;
    let duration = start.elapsed().as_secs_f32();

    ui::success(&format!(
        "Indexed {} videos in {:.1}s ({} added, {} updated)",
        scan.videos.len(),
        duration,
        summary.added,
        summary.updated
    ));
    if scan.errors > 0 {
        ui::warn(&format!("{} files could not be read", scan.errors));
    }

    Ok(())
}
