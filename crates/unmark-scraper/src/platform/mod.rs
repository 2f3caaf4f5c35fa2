//! Platform detection and the analysis entry point.

mod douyin;
mod xiaohongshu;

use unmark_core::{AppType, ImageFormat, MediaResult};

use crate::client::Fetcher;
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::redirect::RedirectResolver;
use crate::share_text::extract_url;

/// A supported source platform and the page conventions it follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Douyin,
    Xiaohongshu,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Douyin, Platform::Xiaohongshu];

    /// Classifies `url` by its host. Unparseable URLs and foreign hosts
    /// yield `None`.
    #[must_use]
    pub fn detect(url: &str) -> Option<Platform> {
        let parsed = reqwest::Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|platform| platform.host_families().iter().any(|d| host.contains(d)))
    }

    /// Case-insensitive match of the platform's host family anywhere in
    /// `url`. Looser than [`Platform::detect`]; used for upstream routing.
    #[must_use]
    pub fn is_platform_url(self, url: &str) -> bool {
        let lowered = url.to_ascii_lowercase();
        self.host_families().iter().any(|d| lowered.contains(d))
    }

    #[must_use]
    pub fn app_type(self) -> AppType {
        match self {
            Platform::Douyin => AppType::Douyin,
            Platform::Xiaohongshu => AppType::Xiaohongshu,
        }
    }

    fn host_families(self) -> &'static [&'static str] {
        match self {
            Platform::Douyin => &["douyin.com", "v.douyin.com", "iesdouyin.com"],
            Platform::Xiaohongshu => &["xiaohongshu.com", "xhslink.com", "xhs.link"],
        }
    }

    /// Path shapes of permanent links, which need no redirect probe.
    fn canonical_markers(self) -> &'static [&'static str] {
        match self {
            Platform::Douyin => &["iesdouyin.com/share/", "douyin.com/video/", "douyin.com/note/"],
            Platform::Xiaohongshu => &["xiaohongshu.com/explore/"],
        }
    }

    /// Text that only appears on pages still carrying platform content.
    fn data_markers(self) -> &'static [&'static str] {
        match self {
            Platform::Douyin => &["_ROUTER_DATA", "douyin", "抖音"],
            Platform::Xiaohongshu => &["__INITIAL_STATE__", "xiaohongshu", "小红书"],
        }
    }

    /// Global the page assigns its state object to.
    fn state_marker(self) -> &'static str {
        match self {
            Platform::Douyin => "window._ROUTER_DATA",
            Platform::Xiaohongshu => "window.__INITIAL_STATE__",
        }
    }
}

impl From<AppType> for Platform {
    fn from(app_type: AppType) -> Self {
        match app_type {
            AppType::Douyin => Platform::Douyin,
            AppType::Xiaohongshu => Platform::Xiaohongshu,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.app_type().as_str())
    }
}

/// Turns share text into a [`MediaResult`].
///
/// Holds only immutable configuration and connection pools, so one instance
/// can serve any number of concurrent analyses.
pub struct MediaExtractor {
    config: ScraperConfig,
    fetcher: Fetcher,
    resolver: RedirectResolver,
}

impl MediaExtractor {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if an HTTP client cannot be built.
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let fetcher = Fetcher::new(config.timeout_secs, &config.user_agent)?;
        let resolver = RedirectResolver::new(
            config.timeout_secs,
            &config.user_agent,
            config.video_host_allowlist.clone(),
        )?;
        Ok(Self {
            config,
            fetcher,
            resolver,
        })
    }

    #[must_use]
    pub fn supported_platforms() -> [AppType; 2] {
        Platform::ALL.map(Platform::app_type)
    }

    /// Extracts the link from `text`, detects its platform, and analyzes it.
    ///
    /// `format` picks the rendition requested for rewritten images; `None`
    /// uses the configured default.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::EmptyInput`], [`ScraperError::UrlNotFound`],
    ///   [`ScraperError::UnsupportedPlatform`]: nothing analyzable in `text`.
    /// - [`ScraperError::Http`], [`ScraperError::UnexpectedStatus`]: the page
    ///   could not be read.
    /// - [`ScraperError::DeadLink`]: the content no longer exists.
    pub async fn analyze(
        &self,
        text: &str,
        format: Option<ImageFormat>,
    ) -> Result<MediaResult, ScraperError> {
        let url = share_url(text)?;
        let Some(platform) = Platform::detect(&url) else {
            tracing::info!(url = %url, "share link is not from a supported platform");
            return Err(ScraperError::UnsupportedPlatform { url });
        };
        self.dispatch(platform, url, format).await
    }

    /// Like [`MediaExtractor::analyze`] but trusts the caller's choice of
    /// platform instead of detecting it.
    ///
    /// # Errors
    ///
    /// Same as [`MediaExtractor::analyze`], minus `UnsupportedPlatform`.
    pub async fn analyze_as(
        &self,
        platform: Platform,
        text: &str,
        format: Option<ImageFormat>,
    ) -> Result<MediaResult, ScraperError> {
        let url = share_url(text)?;
        self.dispatch(platform, url, format).await
    }

    async fn dispatch(
        &self,
        platform: Platform,
        url: String,
        format: Option<ImageFormat>,
    ) -> Result<MediaResult, ScraperError> {
        let format = format.unwrap_or(self.config.image_format);
        tracing::info!(%platform, url = %url, %format, "analyzing share link");
        let result = match platform {
            Platform::Douyin => self.analyze_douyin(url).await,
            Platform::Xiaohongshu => self.analyze_xiaohongshu(url, format).await,
        };
        match &result {
            Ok(media) if media.is_empty() => tracing::warn!(
                %platform,
                url = %media.final_url,
                "analysis complete but no media recovered"
            ),
            Ok(media) => tracing::info!(
                %platform,
                images = media.image_list.len(),
                has_video = !media.video.is_empty(),
                "analysis complete"
            ),
            Err(e) => tracing::warn!(%platform, error = %e, "analysis failed"),
        }
        result
    }
}

fn share_url(text: &str) -> Result<String, ScraperError> {
    if text.trim().is_empty() {
        return Err(ScraperError::EmptyInput);
    }
    extract_url(text).ok_or_else(|| ScraperError::UrlNotFound {
        text: text.to_owned(),
    })
}

/// `true` when any path segment of `url` is exactly `404`; the note
/// platform redirects expired share links to such a page.
fn has_not_found_segment(url: &str) -> bool {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.path_segments().map(|mut segments| segments.any(|s| s == "404")))
        .unwrap_or(false)
}
