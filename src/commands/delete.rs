//! Delete command - forget every video of one device

use anyhow::Result;

use crate::storage;
use crate::ui;

pub fn run(device: u64, auto_confirm: bool) -> Result<()> {
    let index = storage::open_default()?;
    let count = index.count_for_device(device)?;

    if count == 0 {
        ui::info(&format!("No records found for device {}", device));
        return Ok(());
    }

    ui::warn(&format!("Found {} records for device {}", count, device));

    if !auto_confirm && !super::confirm("Delete these records?")? {
        ui::info("Cancelled");
        return Ok(());
    }

    let deleted = index.delete_device(device)?;
    ui::success(&format!("Deleted {} records", deleted));

    Ok(())
}
