#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use filebench::bench::{HarnessConfig, load_harness_config};
use filebench::{BenchResult, merge_cmd, run_cmd};

#[derive(Parser, Debug)]
#[command(name = "filebench")]
#[command(about = "Columnar file format read/write benchmarks", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set FILEBENCH_LOG)
    #[arg(long)]
    verbose: bool,

    /// TOML file overriding the built-in datasets, thread counts and iterations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding sources, artifacts and result tables
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Time writes then reads for every dataset at every thread count
    Run,

    /// Merge native and external result tables and record artifact sizes
    Merge,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("FILEBENCH_LOG").unwrap_or_else(|_| {
        if verbose { "filebench=debug".to_string() } else { "filebench=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn load_config(path: Option<PathBuf>) -> BenchResult<HarnessConfig> {
    match path {
        Some(p) => load_harness_config(&p),
        None => Ok(HarnessConfig::default()),
    }
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config).and_then(|config| match cli.command {
        Commands::Run => run_cmd::run(&config, &cli.dir),
        Commands::Merge => merge_cmd::run(&config, &cli.dir),
    });

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
