use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use update_version::config;
use update_version::domain::{Version, VersionBump};
use update_version::history;
use update_version::ui;
use update_version::workflow::{self, WorkflowArgs};

#[derive(clap::Parser)]
#[command(
    name = "update_version",
    version,
    about = "Bump the project version everywhere it appears and record a changelog entry"
)]
struct Args {
    #[arg(
        value_parser = VersionBump::parse,
        help = "Version segment to increment: major, minor, or patch"
    )]
    increment: VersionBump,

    #[arg(help = "Project root (defaults to the current directory)")]
    project_root: Option<PathBuf>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without writing files")]
    dry_run: bool,

    #[arg(
        long,
        value_name = "X.Y.Z",
        value_parser = Version::parse,
        help = "Use this as the current version instead of reading the package manifest"
    )]
    current: Option<Version>,

    #[arg(short, long, help = "Print debug logging")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // usage errors exit 1; --help and --version exit 0
        Err(e) if e.use_stderr() => {
            eprint!("{}", e);
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    init_tracing(args.verbose);

    let project_root = match args.project_root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    // Load configuration
    let config = match config::load_config(args.config.as_deref(), &project_root) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    ui::display_header(&project_root, args.increment, args.dry_run);

    let history = history::open_history(&config.history, &project_root);
    let workflow_args = WorkflowArgs {
        increment: args.increment,
        project_root,
        current_version: args.current,
        dry_run: args.dry_run,
    };
    let today = chrono::Local::now().date_naive();

    let report = match workflow::run_update_workflow(&workflow_args, &config, &history, today) {
        Ok(report) => report,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_report(&report);
    if !report.dry_run {
        ui::display_next_steps(&ui::next_steps(&config, &report.next));
    }

    Ok(())
}
