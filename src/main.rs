use clap::Parser;
use iceberg_tracker::cli::{run, Cli};
use iceberg_tracker::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
