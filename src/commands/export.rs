//! Export command - dump the index as CSV or JSON

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::ExportFormat;
use crate::core::VideoRecord;
use crate::storage;
use crate::ui;

pub fn run(output: Option<&Path>, format: ExportFormat, device: Option<u64>) -> Result<()> {
	let index = storage::open_default()?;
	let videos = index.videos(device)?;

	if videos.is_empty() {
		match device {
			Some(id) => ui::warn(&format!("No video files found for device {}.", id)),
			None => ui::warn("No video files found in the database."),
		}
		return Ok(());
	}

	let path = output.map_or_else(|| PathBuf::from(format.default_file()), Path::to_path_buf);
	ui::debug(&format!("Exporting {} records as {:?}", videos.len(), format));

	if path.to_str() == Some("-") {
		return write_records(&videos, format, io::stdout().lock());
	}

	let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
	write_records(&videos, format, BufWriter::new(file))
		.with_context(|| format!("Failed to write {}", path.display()))?;

	ui::success(&format!(
		"{} file records written to {}",
		videos.len(),
		ui::path_link(&path, 60)
	));
	Ok(())
}

/// Serialize records, with a header row for CSV
pub fn write_records<W: Write>(videos: &[VideoRecord], format: ExportFormat, mut writer: W) -> Result<()> {
	match format {
		ExportFormat::Csv => {
			let mut rows = csv::Writer::from_writer(writer);
			for video in videos {
				rows.serialize(video)?;
			}
			rows.flush()?;
		}
		ExportFormat::Json => {
			serde_json::to_writer_pretty(&mut writer, videos).context("Failed to serialize video list")?;
			writeln!(writer)?;
			writer.flush()?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(path: &str, size: u64) -> VideoRecord {
		VideoRecord {
			partition: String::new(),
			full_path: path.to_string(),
			filename: "Movie.One.mkv".to_string(),
			normalized_filename: "Movie One.mkv".to_string(),
			file_size: size,
			created: "2024-01-02 03:04:05".to_string(),
			modified: "2024-01-02 03:04:05".to_string(),
			device_id: 2049,
		}
	}

	#[test]
	fn csv_has_header_and_rows() {
		let mut out = Vec::new();
		write_records(&[record("/m/a.mkv", 10), record("/m/b.mkv", 20)], ExportFormat::Csv, &mut out).unwrap();

		let text = String::from_utf8(out).unwrap();
		let lines: Vec<&str> = text.lines().collect();
		assert_eq!(
			lines[0],
			"partition,full_path,filename,normalized_filename,file_size,created,modified,device_id"
		);
		assert_eq!(lines.len(), 3);
		assert_eq!(
			lines[1],
			",/m/a.mkv,Movie.One.mkv,Movie One.mkv,10,2024-01-02 03:04:05,2024-01-02 03:04:05,2049"
		);
	}

	#[test]
	fn csv_reads_back() {
		let videos = vec![record("/m/with, comma.mkv", 7)];
		let mut out = Vec::new();
		write_records(&videos, ExportFormat::Csv, &mut out).unwrap();

		let mut reader = csv::Reader::from_reader(out.as_slice());
		let back: Vec<VideoRecord> = reader.deserialize().collect::<csv::Result<_>>().unwrap();
		assert_eq!(back, videos);
	}

	#[test]
	fn json_is_an_array() {
		let mut out = Vec::new();
		write_records(&[record("/m/a.mkv", 10)], ExportFormat::Json, &mut out).unwrap();
		let back: Vec<VideoRecord> = serde_json::from_slice(&out).unwrap();
		assert_eq!(back.len(), 1);
	}
}
