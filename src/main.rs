use anyhow::Result;
use ddo_monsters::{config::Config, console, fetcher::HttpPageSource};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the table on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = HttpPageSource::new();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    console::run(stdin, &mut stdout, &source, Config::load).await?;
    Ok(())
}
