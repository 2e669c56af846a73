//! Cluster command - group videos by filename similarity

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::*;

use crate::cli::ClusterMethod;
use crate::core::{ClusterReport, VideoRecord};
use crate::processing::cluster::{EditDistance, Method, ShingleOverlap, TfidfKmeans};
use crate::processing::{self, scan::resolve_root};
use crate::storage;
use crate::ui;

/// Where the names to cluster come from
pub enum Source<'a> {
	Index { device: Option<u64> },
	Folder(&'a Path),
}

/// Algorithm parameters as given on the command line
pub struct Params {
	pub method: ClusterMethod,
	pub max_dist: f64,
	pub min_points: usize,
	pub k: usize,
	pub seed: u64,
	pub threshold: f64,
}

impl Params {
	pub fn method(&self) -> Method {
		match self.method {
			ClusterMethod::Edit => {
				Method::EditDistance(EditDistance::new(self.max_dist).with_min_points(self.min_points))
			}
			ClusterMethod::Tfidf => Method::TfidfKmeans(TfidfKmeans::new(self.k).with_seed(self.seed)),
			ClusterMethod::Shingle => Method::ShingleOverlap(ShingleOverlap::new(self.threshold)),
		}
	}
}

/// Display options
pub struct View<'a> {
	pub raw_names: bool,
	pub min_size: usize,
	pub preview: usize,
	pub export: Option<&'a Path>,
}

pub fn run(source: Source<'_>, params: &Params, view: &View<'_>) -> Result<()> {
	let start = Instant::now();

	let videos = load_videos(&source)?;
	if videos.is_empty() {
		ui::warn("No videos to cluster. Run 'vidsift scan' first");
		return Ok(());
	}

	let names: Vec<&str> = videos
		.iter()
		.map(|v| {
			if view.raw_names {
				v.filename.as_str()
			} else {
				v.normalized_filename.as_str()
			}
		})
		.collect();

	let method = params.method();
	ui::info(&format!("Clustering {} names with {}", names.len(), method));

	let partition = match &method {
		Method::TfidfKmeans(kmeans) => {
			let fit = kmeans.fit(&names).context("Clustering failed")?;
			ui::debug(&format!(
				"k-means ran {} iterations (converged: {}, inertia {:.4})",
				fit.iterations, fit.converged, fit.inertia
			));
			if !fit.converged {
				ui::warn(&format!("k-means stopped after {} iterations without converging", fit.iterations));
			}
			fit.partition
		}
		other => other.partition(&names).context("Clustering failed")?,
	};

	let sizes = partition.group_sizes();
	ui::debug(&format!(
		"Group sizes: min={}, max={}",
		sizes.iter().min().unwrap_or(&0),
		sizes.iter().max().unwrap_or(&0)
	));

	let report = ClusterReport::new(method.to_string(), partition.resolve(&names));

	if let Some(path) = view.export {
		let json = serde_json::to_string_pretty(&report).context("Failed to serialize clusters")?;
		return super::write_json(&json, path);
	}

	print_report(&report, view);
	eprintln!(
		"\n{}",
		format!("Completed in {:.1}s", start.elapsed().as_secs_f32()).dimmed()
	);

	Ok(())
}

fn load_videos(source: &Source<'_>) -> Result<Vec<VideoRecord>> {
	match source {
		Source::Index { device } => {
			let index = storage::open_default()?;
			let videos = index.videos(*device)?;
			ui::debug(&format!("Loaded {} records from the index", videos.len()));
			Ok(videos)
		}
		Source::Folder(dir) => {
			let root = resolve_root(dir);
			ui::info(&format!("Scanning: {}", ui::path_link(&root, 60)));
			let scan = processing::scan_directory(&root, &[])?;
			if scan.errors > 0 {
				ui::warn(&format!("{} files could not be read", scan.errors));
			}
			Ok(scan.videos)
		}
	}
}

fn print_report(report: &ClusterReport, view: &View<'_>) {
	ui::success(&format!(
		"{} groups, {} names, {:.1}% unmatched",
		report.groups.len(),
		report.total_names,
		report.singleton_percent()
	));

	let shown: Vec<_> = report
		.groups
		.iter()
		.filter(|g| g.names.len() >= view.min_size)
		.collect();

	if shown.is_empty() {
		ui::info(&format!("No groups with at least {} names", view.min_size));
		return;
	}

	for group in &shown {
		println!(
			"\n{} {} ({} names)",
			"Group".bright_white(),
			group.id.to_string().bright_cyan(),
			group.names.len()
		);

		for (i, name) in group.names.iter().take(view.preview).enumerate() {
			println!("  {} {}", format!("[{}]", i + 1).dimmed(), ui::shorten(name, 70));
		}

		if group.names.len() > view.preview {
			println!(
				"  {}",
				format!("... and {} more", group.names.len() - view.preview).dimmed()
			);
		}
	}

	let hidden = report.groups.len() - shown.len();
	if hidden > 0 {
		ui::debug(&format!("{} groups below --min-size {} hidden", hidden, view.min_size));
	}
}
