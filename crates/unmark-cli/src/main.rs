mod analyze;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use unmark_core::{AppType, ImageFormat};

#[derive(Debug, Parser)]
#[command(name = "unmark-cli")]
#[command(about = "Extract watermark-free media from share links")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the shared post and print its media as JSON.
    Analyze {
        /// Share text or link as copied from the app.
        text: String,
        /// Skip host detection and treat the link as this platform.
        #[arg(long)]
        platform: Option<AppType>,
        /// Image rendition for rewritten image URLs (jpg, png, webp).
        #[arg(long)]
        format: Option<ImageFormat>,
    },
    /// Print the link found in the share text and its platform, offline.
    Detect { text: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = unmark_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Analyze {
            text,
            platform,
            format,
        }) => analyze::run_analyze(&config, &text, platform, format).await?,
        Some(Commands::Detect { text }) => {
            let detection = analyze::detect(&text)?;
            println!("{detection}");
        }
        None => println!(
            "unmark-cli ready; supported platforms: {:?}",
            unmark_scraper::MediaExtractor::supported_platforms()
        ),
    }

    Ok(())
}
