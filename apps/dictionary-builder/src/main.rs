//! Dictionary Builder command line entry point.

use clap::Parser;

use dictionary_builder::cli::{run, Cli};
use dictionary_builder::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
