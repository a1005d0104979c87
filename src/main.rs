use clap::Parser;

use nimchat::cli::{self, Args};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Pick up NVIDIA_API_KEY from a local .env file if one exists.
    dotenvy::dotenv().ok();

    let args = Args::parse();
    cli::run(args).await
}
