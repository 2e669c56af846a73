//! SQLite index of scanned videos and their devices

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use crate::config::{DEVICE_TABLE, VIDEO_TABLE};
use crate::core::{DeviceRecord, VideoRecord};

/// Outcome of storing one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpsertSummary {
	pub added: usize,
	pub updated: usize,
}

pub struct VideoIndex {
	conn: Connection,
}

impl VideoIndex {
	/// Open (or create) the database file
	pub fn open(path: &Path) -> Result<Self> {
		let conn = Connection::open(path)
			.with_context(|| format!("Failed to open database {}", path.display()))?;
		Self::with_connection(conn)
	}

	pub fn open_in_memory() -> Result<Self> {
		Self::with_connection(Connection::open_in_memory()?)
	}

	fn with_connection(conn: Connection) -> Result<Self> {
		let index = Self { conn };
		index.initialize_schema()?;
		Ok(index)
	}

	fn initialize_schema(&self) -> Result<()> {
		self.conn
			.execute(
				&format!(
					"CREATE TABLE IF NOT EXISTS {VIDEO_TABLE} (
						id INTEGER PRIMARY KEY AUTOINCREMENT,
						partition TEXT NOT NULL,
						full_path TEXT NOT NULL,
						filename TEXT NOT NULL,
						normalized_filename TEXT NOT NULL,
						file_size INTEGER NOT NULL,
						created TEXT NOT NULL,
						modified TEXT NOT NULL,
						device_id INTEGER NOT NULL,
						UNIQUE(device_id, full_path)
					)"
				),
				[],
			)
			.context("Failed to create video table")?;

		self.conn
			.execute(
				&format!(
					"CREATE TABLE IF NOT EXISTS {DEVICE_TABLE} (
						device_id INTEGER PRIMARY KEY,
						partition TEXT NOT NULL,
						path TEXT NOT NULL,
						volume_name TEXT NOT NULL,
						last_scanned TEXT NOT NULL,
						total_space INTEGER,
						available_space INTEGER
					)"
				),
				[],
			)
			.context("Failed to create device table")?;

		self.conn.execute(
			&format!("CREATE INDEX IF NOT EXISTS idx_{VIDEO_TABLE}_size ON {VIDEO_TABLE}(file_size)"),
			[],
		)?;

		Ok(())
	}

	/// Insert new rows, refresh rows already known for (device, path)
	pub fn upsert_videos(&mut self, videos: &[VideoRecord]) -> Result<UpsertSummary> {
		let before = self.count_videos()?;

		let tx = self.conn.transaction()?;
		{
			let mut stmt = tx.prepare(&format!(
				"INSERT INTO {VIDEO_TABLE}
					(partition, full_path, filename, normalized_filename, file_size, created, modified, device_id)
				VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
				ON CONFLICT(device_id, full_path) DO UPDATE SET
					partition = excluded.partition,
					filename = excluded.filename,
					normalized_filename = excluded.normalized_filename,
					file_size = excluded.file_size,
					created = excluded.created,
					modified = excluded.modified"
			))?;

			for video in videos {
				stmt.execute(params![
					video.partition,
					video.full_path,
					video.filename,
					video.normalized_filename,
					to_sql_int(video.file_size),
					video.created,
					video.modified,
					to_sql_int(video.device_id),
				])
				.with_context(|| format!("Failed to store '{}'", video.full_path))?;
			}
		}
		tx.commit().context("Failed to commit scan")?;

		let added = self.count_videos()? - before;
		Ok(UpsertSummary {
			added,
			updated: videos.len().saturating_sub(added),
		})
	}

	pub fn upsert_device(&self, device: &DeviceRecord) -> Result<()> {
		self.conn
			.execute(
				&format!(
					"INSERT INTO {DEVICE_TABLE}
						(device_id, partition, path, volume_name, last_scanned, total_space, available_space)
					VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
					ON CONFLICT(device_id) DO UPDATE SET
						partition = excluded.partition,
						path = excluded.path,
						volume_name = excluded.volume_name,
						last_scanned = excluded.last_scanned,
						total_space = excluded.total_space,
						available_space = excluded.available_space"
				),
				params![
					to_sql_int(device.device_id),
					device.partition,
					device.path,
					device.volume_name,
					device.last_scanned,
					to_sql_int(device.total_space),
					to_sql_int(device.available_space),
				],
			)
			.context("Failed to update device metadata")?;
		Ok(())
	}

	/// Videos ordered by size, optionally limited to one device
	pub fn videos(&self, device: Option<u64>) -> Result<Vec<VideoRecord>> {
		let columns = "partition, full_path, filename, normalized_filename, file_size, created, modified, device_id";
		let rows = match device {
			Some(id) => {
				let mut stmt = self.conn.prepare(&format!(
					"SELECT {columns} FROM {VIDEO_TABLE} WHERE device_id = ?1 ORDER BY file_size, id"
				))?;
				let rows = stmt.query_map([to_sql_int(id)], video_from_row)?;
				rows.collect::<rusqlite::Result<Vec<_>>>()?
			}
			None => {
				let mut stmt = self
					.conn
					.prepare(&format!("SELECT {columns} FROM {VIDEO_TABLE} ORDER BY file_size, id"))?;
				let rows = stmt.query_map([], video_from_row)?;
				rows.collect::<rusqlite::Result<Vec<_>>>()?
			}
		};
		Ok(rows)
	}

	pub fn devices(&self) -> Result<Vec<DeviceRecord>> {
		let mut stmt = self.conn.prepare(&format!(
			"SELECT device_id, partition, path, volume_name, last_scanned, total_space, available_space
			FROM {DEVICE_TABLE} ORDER BY device_id"
		))?;
		let rows = stmt.query_map([], |row| {
			Ok(DeviceRecord {
				device_id: from_sql_int(row.get(0)?),
				partition: row.get(1)?,
				path: row.get(2)?,
				volume_name: row.get(3)?,
				last_scanned: row.get(4)?,
				total_space: from_sql_int(row.get::<_, Option<i64>>(5)?.unwrap_or(0)),
				available_space: from_sql_int(row.get::<_, Option<i64>>(6)?.unwrap_or(0)),
			})
		})?;
		Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
	}

	pub fn count_videos(&self) -> Result<usize> {
		let count: i64 = self
			.conn
			.query_row(&format!("SELECT COUNT(*) FROM {VIDEO_TABLE}"), [], |row| row.get(0))?;
		Ok(count as usize)
	}

	pub fn count_for_device(&self, device_id: u64) -> Result<usize> {
		let count: i64 = self.conn.query_row(
			&format!("SELECT COUNT(*) FROM {VIDEO_TABLE} WHERE device_id = ?1"),
			[to_sql_int(device_id)],
			|row| row.get(0),
		)?;
		Ok(count as usize)
	}

	/// Remove every video row of a device, returning how many went
	pub fn delete_device(&self, device_id: u64) -> Result<usize> {
		let deleted = self
			.conn
			.execute(
				&format!("DELETE FROM {VIDEO_TABLE} WHERE device_id = ?1"),
				[to_sql_int(device_id)],
			)
			.with_context(|| format!("Failed to delete video records for device {}", device_id))?;
		Ok(deleted)
	}
}

fn video_from_row(row: &Row<'_>) -> rusqlite::Result<VideoRecord> {
	Ok(VideoRecord {
		partition: row.get(0)?,
		full_path: row.get(1)?,
		filename: row.get(2)?,
		normalized_filename: row.get(3)?,
		file_size: from_sql_int(row.get(4)?),
		created: row.get(5)?,
		modified: row.get(6)?,
		device_id: from_sql_int(row.get(7)?),
	})
}

// SQLite integers are signed; device numbers and sizes round-trip bit for bit
fn to_sql_int(value: u64) -> i64 {
	value as i64
}

fn from_sql_int(value: i64) -> u64 {
	value as u64
}

#[cfg(test)]
mod tests {
	use super::*;

	fn video(path: &str, size: u64, device_id: u64) -> VideoRecord {
		let filename = path.rsplit('/').next().unwrap_or(path).to_string();
		VideoRecord {
			partition: String::new(),
			full_path: path.to_string(),
			normalized_filename: crate::core::normalize_filename(&filename),
			filename,
			file_size: size,
			created: "2024-01-01 00:00:00".into(),
			modified: "2024-01-02 00:00:00".into(),
			device_id,
		}
	}

	fn device(device_id: u64, path: &str) -> DeviceRecord {
		DeviceRecord {
			device_id,
			partition: "/".into(),
			path: path.into(),
			volume_name: "disk".into(),
			last_scanned: "2024-01-03 00:00:00".into(),
			total_space: 1000,
			available_space: 400,
		}
	}

	#[test]
	fn upsert_counts_new_and_refreshed_rows() {
		let mut index = VideoIndex::open_in_memory().unwrap();
		let first = index.upsert_videos(&[video("/m/a.mp4", 5, 1), video("/m/b.mp4", 3, 1)]).unwrap();
		assert_eq!(first, UpsertSummary { added: 2, updated: 0 });

		let second = index.upsert_videos(&[video("/m/a.mp4", 9, 1), video("/m/c.mp4", 1, 1)]).unwrap();
		assert_eq!(second, UpsertSummary { added: 1, updated: 1 });

		let videos = index.videos(None).unwrap();
		assert_eq!(videos.len(), 3);
		let a = videos.iter().find(|v| v.full_path == "/m/a.mp4").unwrap();
		assert_eq!(a.file_size, 9);
	}

	#[test]
	fn same_path_on_two_devices_is_two_rows() {
		let mut index = VideoIndex::open_in_memory().unwrap();
		index.upsert_videos(&[video("/m/a.mp4", 5, 1), video("/m/a.mp4", 5, 2)]).unwrap();
		assert_eq!(index.count_videos().unwrap(), 2);
	}

	#[test]
	fn videos_ordered_by_size_and_filtered_by_device() {
		let mut index = VideoIndex::open_in_memory().unwrap();
		index
			.upsert_videos(&[video("/m/big.mp4", 50, 1), video("/m/small.mp4", 2, 1), video("/n/mid.mkv", 10, 2)])
			.unwrap();

		let sizes: Vec<u64> = index.videos(None).unwrap().iter().map(|v| v.file_size).collect();
		assert_eq!(sizes, vec![2, 10, 50]);

		let on_one: Vec<String> = index.videos(Some(1)).unwrap().into_iter().map(|v| v.filename).collect();
		assert_eq!(on_one, vec!["small.mp4", "big.mp4"]);
	}

	#[test]
	fn delete_by_device() {
		let mut index = VideoIndex::open_in_memory().unwrap();
		index
			.upsert_videos(&[video("/m/a.mp4", 1, 7), video("/m/b.mp4", 1, 7), video("/n/c.mp4", 1, 8)])
			.unwrap();

		assert_eq!(index.count_for_device(7).unwrap(), 2);
		assert_eq!(index.delete_device(7).unwrap(), 2);
		assert_eq!(index.count_for_device(7).unwrap(), 0);
		assert_eq!(index.delete_device(7).unwrap(), 0);
		assert_eq!(index.count_videos().unwrap(), 1);
	}

	#[test]
	fn device_rows_upsert() {
		let index = VideoIndex::open_in_memory().unwrap();
		index.upsert_device(&device(3, "/first")).unwrap();
		index.upsert_device(&device(3, "/second")).unwrap();
		index.upsert_device(&device(4, "/other")).unwrap();

		let devices = index.devices().unwrap();
		assert_eq!(devices.len(), 2);
		assert_eq!(devices[0].path, "/second");
		assert_eq!(devices[0].available_space, 400);
	}

	#[test]
	fn large_device_numbers_round_trip() {
		let mut index = VideoIndex::open_in_memory().unwrap();
		let id = u64::MAX - 5;
		index.upsert_videos(&[video("/m/a.mp4", 1, id)]).unwrap();
		assert_eq!(index.videos(Some(id)).unwrap()[0].device_id, id);
	}

	#[test]
	fn reopening_a_file_keeps_rows() {
		let tmp = tempfile::TempDir::new().unwrap();
		let path = tmp.path().join("index.db");
		{
			let mut index = VideoIndex::open(&path).unwrap();
			index.upsert_videos(&[video("/m/a.mp4", 1, 1)]).unwrap();
		}
		let index = VideoIndex::open(&path).unwrap();
		assert_eq!(index.count_videos().unwrap(), 1);
	}
}
