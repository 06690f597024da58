use std::process::ExitCode;

use clap::Parser;
use confidex_scripts::cli::Cli;
use dotenv::dotenv;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr, stdout only carries the deployment report
    tracing_subscriber::fmt()
        .pretty()
        .with_writer(std::io::stderr)
        .init();

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
