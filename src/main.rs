// Entry point: parses the command line, loads config, and runs the TUI.

use std::path::PathBuf;

use clap::Parser;

use photopoet::app::App;
use photopoet::config::Config;
use photopoet::logging;

#[derive(Parser)]
#[command(name = "photopoet", version, about = "Turn a photo into a poem")]
struct Cli {
    /// Photo to load on start-up.
    photo: Option<PathBuf>,

    /// Poem generation endpoint (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    /// Path to an alternative config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.generator.endpoint = endpoint;
    }

    logging::init()?;
    tracing::info!(endpoint = %config.generator.endpoint, "starting photopoet");

    let photo = cli.photo.map(|p| photopoet::photo::normalize_path(&p.to_string_lossy()));
    let mut app = App::new(config)?.with_photo(photo);
    app.run().await?;

    Ok(())
}
