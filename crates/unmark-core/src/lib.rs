pub mod allowlist;
pub mod app_config;
pub mod config;
pub mod media;

pub use allowlist::{default_video_host_allowlist, HostAllowlist};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use media::{AppType, ImageFormat, MediaResult};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
