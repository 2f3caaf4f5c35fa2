//! Command handlers for `analyze` and `detect`.
//!
//! Results go to stdout; logs go to stderr so the JSON output can be piped.

use unmark_core::{AppConfig, AppType, ImageFormat};
use unmark_scraper::{extract_url, MediaExtractor, Platform, ScraperConfig};

/// What `detect` found in a piece of share text, without any network access.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Detection {
    pub url: String,
    pub platform: Option<Platform>,
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "url: {}", self.url)?;
        match self.platform {
            Some(platform) => write!(f, "platform: {platform}"),
            None => write!(f, "platform: unsupported"),
        }
    }
}

/// # Errors
///
/// Returns an error if the text contains no link or short code.
pub(crate) fn detect(text: &str) -> anyhow::Result<Detection> {
    let url = extract_url(text).ok_or_else(|| anyhow::anyhow!("no link found in share text"))?;
    let platform = Platform::detect(&url);
    Ok(Detection { url, platform })
}

/// Analyze one share text and print the result as pretty JSON.
///
/// # Errors
///
/// Returns an error if the extractor cannot be built or the analysis fails;
/// the message names the failure category so callers can tell an expired
/// link from a network problem.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    text: &str,
    platform: Option<AppType>,
    format: Option<ImageFormat>,
) -> anyhow::Result<()> {
    let extractor = MediaExtractor::new(ScraperConfig::from_app_config(config))
        .map_err(|e| anyhow::anyhow!("failed to build extractor: {e}"))?;

    let outcome = match platform {
        Some(app_type) => {
            extractor
                .analyze_as(Platform::from(app_type), text, format)
                .await
        }
        None => extractor.analyze(text, format).await,
    };
    let result = outcome.map_err(|e| anyhow::anyhow!("{:?} error: {e}", e.kind()))?;

    tracing::debug!(
        app_type = %result.app_type,
        images = result.image_list.len(),
        "analysis finished"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
