//! vidsift - index video files and group look-alike filenames

use anyhow::Result;
use clap::Parser;

use vidsift::cli::{Cli, Command};
use vidsift::commands::{self, cluster};
use vidsift::config;
use vidsift::ui::{self, Log};

fn main() {
	let cli = Cli::parse();

	Log::set_verbose(cli.verbose);
	if let Some(db) = cli.db.clone() {
		config::set_db_path(db);
	}

	if let Err(e) = run(cli.command) {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run(command: Command) -> Result<()> {
	match command {
		Command::Scan {
			directory,
			exclude_patterns,
		} => {
			ui::print_logo();
			commands::scan::run(&directory, &exclude_patterns)
		}
		Command::Export { output, format, device } => commands::export::run(output.as_deref(), format, device),
		Command::Devices => commands::devices::run(),
		Command::Delete { device, auto_confirm } => commands::delete::run(device, auto_confirm),
		Command::Cluster {
			method,
			max_dist,
			min_points,
			k,
			seed,
			threshold,
			device,
			directory,
			raw_names,
			min_size,
			preview,
			export,
		} => {
			let source = match directory.as_deref() {
				Some(dir) => cluster::Source::Folder(dir),
				None => cluster::Source::Index { device },
			};
			let params = cluster::Params {
				method,
				max_dist,
				min_points,
				k,
				seed,
				threshold,
			};
			let view = cluster::View {
				raw_names,
				min_size,
				preview,
				export: export.as_deref(),
			};
			cluster::run(source, &params, &view)
		}
	}
}
