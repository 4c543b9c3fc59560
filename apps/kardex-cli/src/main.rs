//! # kardex Entry Point
//!
//! Parses flags, sets up logging and hands over to [`kardex_cli::run`].
//! The run itself lives in the library for testability.

use clap::Parser;

use kardex_cli::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    kardex_cli::init_tracing();

    kardex_cli::run(cli).await?;
    Ok(())
}
