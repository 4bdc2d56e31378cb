//! proofchain CLI entry point.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod repl;
mod wallet;

use config::NodeConfig;

#[derive(Parser)]
#[command(name = "proofchain")]
#[command(about = "A proof-of-work ledger node", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Ledger state file
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Wallet key file
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config =
        NodeConfig::load(cli.config.as_deref())?.with_overrides(cli.data_file, cli.key_file);
    init_tracing(&config.log.filter);

    match cli.command {
        Some(cmd) => commands::run(cmd, &config),
        None => {
            let mut node = repl::Node::new(config);
            node.run(io::stdin().lock(), &mut io::stdout().lock())
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` or else the configured directive.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
