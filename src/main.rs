use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use treescan::config::load_config_from_env_or_default;
use treescan::error::TreeScanError;
use treescan::{App, Tasks};

#[derive(Parser, Debug)]
#[command(
    name = "treescan",
    about = "Tools to index and display directory stats",
    version
)]
struct Cli {
    /// Path to the directory to index or display stats
    path: PathBuf,

    /// Index the directory into index.txt
    #[arg(short, long)]
    index: bool,

    /// Render directory stats into stats.html
    #[arg(short, long)]
    stats: bool,

    /// Print the stats of every directory to stdout
    #[arg(long)]
    summary: bool,

    /// Sort entries by name instead of directory order
    #[arg(long)]
    sorted: bool,

    /// Leave the generated index file out of the listing
    #[arg(long)]
    exclude_index: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => "treescan=warn",
        1 => "treescan=info",
        _ => "treescan=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = load_config_from_env_or_default();
    config.sort_entries |= cli.sorted;
    config.exclude_index |= cli.exclude_index;

    let app = match App::new(cli.path, config) {
        Ok(app) => app,
        Err(TreeScanError::PathNotFound(_)) => {
            eprintln!("The path does not exist");
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("scanning {}", app.root().display());
    app.run(Tasks {
        index: cli.index,
        stats: cli.stats,
        summary: cli.summary,
    })?;
    Ok(ExitCode::SUCCESS)
}
