use unmark_core::config::DEFAULT_MOBILE_USER_AGENT;
use unmark_core::{AppConfig, HostAllowlist, ImageFormat};

/// Settings the analyzers need, split out of [`AppConfig`] so the engine can
/// be constructed without a full application environment.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub timeout_secs: u64,
    /// Sent on page fetches and redirect probes; the platforms serve their
    /// embedded state to mobile browsers.
    pub user_agent: String,
    pub image_format: ImageFormat,
    pub video_host_allowlist: HostAllowlist,
    pub allowlist_max_hops: u32,
    /// Follow the video URL through its CDN redirects until it lands on an
    /// allowlisted host.
    pub resolve_video_cdn: bool,
}

impl ScraperConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.mobile_user_agent.clone(),
            image_format: config.image_format,
            video_host_allowlist: config.video_host_allowlist.clone(),
            allowlist_max_hops: config.allowlist_max_hops,
            resolve_video_cdn: config.resolve_video_cdn,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_MOBILE_USER_AGENT.to_string(),
            image_format: ImageFormat::default(),
            video_host_allowlist: HostAllowlist::default(),
            allowlist_max_hops: 5,
            resolve_video_cdn: false,
        }
    }
}
