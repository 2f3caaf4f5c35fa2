use std::net::SocketAddr;

use crate::allowlist::HostAllowlist;
use crate::media::ImageFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub mobile_user_agent: String,
    pub image_format: ImageFormat,
    pub video_host_allowlist: HostAllowlist,
    pub allowlist_max_hops: u32,
    pub resolve_video_cdn: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("mobile_user_agent", &self.mobile_user_agent)
            .field("image_format", &self.image_format)
            .field("video_host_allowlist", &self.video_host_allowlist.len())
            .field("allowlist_max_hops", &self.allowlist_max_hops)
            .field("resolve_video_cdn", &self.resolve_video_cdn)
            .finish()
    }
}
