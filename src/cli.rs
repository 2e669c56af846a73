use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{
	DEFAULT_EXPORT_CSV, DEFAULT_EXPORT_JSON, DEFAULT_K, DEFAULT_MAX_DIST, DEFAULT_MIN_POINTS, DEFAULT_PREVIEW, DEFAULT_SEED, DEFAULT_THRESHOLD,
};

/// Filename clustering algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ClusterMethod {
	/// Levenshtein distance, chains of names within --max-dist edits
	#[default]
	Edit,
	/// TF-IDF character n-grams, exactly -k groups
	Tfidf,
	/// Trigram Jaccard overlap, average linkage cut at --threshold
	Shingle,
}

/// File format for `vidsift export`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
	/// One row per video with a header line
	#[default]
	Csv,
	/// Pretty-printed array of records
	Json,
}

impl ExportFormat {
	pub fn default_file(self) -> &'static str {
		match self {
			ExportFormat::Csv => DEFAULT_EXPORT_CSV,
			ExportFormat::Json => DEFAULT_EXPORT_JSON,
		}
	}
}

fn parse_threshold(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if !(0.0..=1.0).contains(&val) {
		Err(format!("threshold must be between 0.0 and 1.0, got {}", val))
	} else {
		Ok(val)
	}
}

fn parse_max_dist(s: &str) -> Result<f64, String> {
	let val: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if !val.is_finite() || val < 0.0 {
		Err(format!("max distance must be a non-negative number, got {}", val))
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

#[derive(Parser, Debug)]
#[command(
	name = "vidsift",
	author,
	version,
	about = "Index video files and group look-alike filenames",
	styles = styles(),
	after_help = format!(
		"{title}
  {bin} {scan}     {scan_args}              {scan_desc}
  {bin} {cluster}  {cluster_args}  {cluster_desc}
  {bin} {cluster}  {tfidf_args}         {tfidf_desc}
  {bin} {export}   {export_args}             {export_desc}
  {bin} {delete}   {delete_args}          {delete_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "vidsift".bright_blue(),
		scan = "scan".yellow(),
		scan_args = "-d D:/Movies",
		scan_desc = "Index every video under a folder".dimmed(),
		cluster = "cluster".yellow(),
		cluster_args = "-m shingle -t 0.35",
		cluster_desc = "Group indexed names by overlap".dimmed(),
		tfidf_args = "-m tfidf -k 20",
		tfidf_desc = "Split names into 20 groups".dimmed(),
		export = "export".yellow(),
		export_args = "-f json -o -",
		export_desc = "Dump the index as JSON".dimmed(),
		delete = "delete".yellow(),
		delete_args = "--device 2049",
		delete_desc = "Forget one device's files".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Database file (default: $VIDSIFT_DB or ./video_files.db)
	#[arg(long = "db", global = true, value_name = "PATH")]
	pub db: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Scan a folder for video files and update the database
	Scan {
		/// Folder to scan (always recursive)
		#[arg(short = 'd', long = "dir", default_value = ".")]
		directory: PathBuf,

		/// Skip paths containing these patterns (comma-separated, e.g., "sample,trailer")
		#[arg(long = "exclude", value_delimiter = ',')]
		exclude_patterns: Vec<String>,
	},

	/// Write every indexed video, smallest first, as CSV or JSON
	Export {
		/// Output file, or "-" for stdout (default: output_videos_list.<format>)
		#[arg(short = 'o', long = "output")]
		output: Option<PathBuf>,

		/// Output format
		#[arg(short = 'f', long = "format", value_enum, default_value_t = ExportFormat::Csv)]
		format: ExportFormat,

		/// Only export files from this device
		#[arg(long = "device")]
		device: Option<u64>,
	},

	/// List metadata of every scanned device
	Devices,

	/// Delete all video records of one device
	Delete {
		/// Device ID as shown by `vidsift devices`
		#[arg(long = "device")]
		device: u64,

		/// Skip confirmation prompt
		#[arg(short = 'y', long = "yes")]
		auto_confirm: bool,
	},

	/// Group videos whose filenames look alike
	Cluster {
		/// Clustering algorithm
		#[arg(short = 'm', long = "method", value_enum, default_value_t = ClusterMethod::Edit)]
		method: ClusterMethod,

		/// Edit method: neighbourhood radius in edits
		#[arg(long = "max-dist", default_value_t = DEFAULT_MAX_DIST, value_parser = parse_max_dist)]
		max_dist: f64,

		/// Edit method: names needed within --max-dist to seed a group
		#[arg(long = "min-points", default_value_t = DEFAULT_MIN_POINTS)]
		min_points: usize,

		/// Tfidf method: number of groups
		#[arg(short = 'k', long = "groups", default_value_t = DEFAULT_K)]
		k: usize,

		/// Tfidf method: random seed for centroid seeding
		#[arg(long = "seed", default_value_t = DEFAULT_SEED)]
		seed: u64,

		/// Shingle method: highest dissimilarity that still merges (0.0-1.0)
		#[arg(short = 't', long = "threshold", default_value_t = DEFAULT_THRESHOLD, value_parser = parse_threshold)]
		threshold: f64,

		/// Only cluster files from this device
		#[arg(long = "device", conflicts_with = "directory")]
		device: Option<u64>,

		/// Cluster a folder directly instead of the database
		#[arg(short = 'd', long = "dir")]
		directory: Option<PathBuf>,

		/// Use filenames as-is instead of normalized names
		#[arg(long = "raw-names")]
		raw_names: bool,

		/// Hide groups smaller than this from the listing
		#[arg(long = "min-size", default_value_t = 2)]
		min_size: usize,

		/// Names shown per group
		#[arg(short = 'n', long = "preview", default_value_t = DEFAULT_PREVIEW)]
		preview: usize,

		/// Write groups as JSON to a file, or "-" for stdout
		#[arg(short = 'e', long = "export", value_name = "PATH")]
		export: Option<PathBuf>,
	},
}
