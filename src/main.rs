use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use proxyscope::feed::FeedClient;
use proxyscope::tui::runner::{run_tui, RunOptions};

#[derive(Parser)]
#[command(name = "proxyscope", about = "Terminal viewer for proxy-list feeds.")]
struct Cli {
    /// URL of the proxy-list JSON feed
    url: String,

    /// Refresh period in seconds
    #[arg(short = 'n', long, default_value_t = 120)]
    interval: u64,

    /// Rows per table page
    #[arg(long, default_value_t = 15)]
    page_size: usize,

    /// Directory exports are written into (defaults to current)
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("proxyscope=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("proxyscope starting, feed {}", cli.url);

    let client = FeedClient::new(cli.url);
    let options = RunOptions {
        refresh_interval: Duration::from_secs(cli.interval),
        page_size: cli.page_size,
        export_dir: cli.export_dir.unwrap_or_else(|| PathBuf::from(".")),
    };
    run_tui(client, options).await
}
