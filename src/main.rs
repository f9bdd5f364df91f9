use clap::Parser;
use stock_barcodes::cli::{run, Cli};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("[ERROR] {err:#}");
        std::process::exit(1);
    }
}
