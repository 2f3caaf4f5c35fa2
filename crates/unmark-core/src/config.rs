use crate::allowlist::{default_video_host_allowlist, HostAllowlist};
use crate::app_config::{AppConfig, Environment};
use crate::media::ImageFormat;
use crate::ConfigError;

pub const DEFAULT_MOBILE_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 16_6 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.6 Mobile/15E148 Safari/604.1 Edg/134.0.0.0";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. Parsing is decoupled from the real process
/// environment so tests can drive it with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("UNMARK_ENV", "development"))?;

    let bind_addr = or_default("UNMARK_BIND_ADDR", "127.0.0.1:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("UNMARK_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("UNMARK_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("UNMARK_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "UNMARK_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let mobile_user_agent = or_default("UNMARK_MOBILE_USER_AGENT", DEFAULT_MOBILE_USER_AGENT);

    let image_format = or_default("UNMARK_IMAGE_FORMAT", "jpg")
        .parse::<ImageFormat>()
        .map_err(|reason| invalid("UNMARK_IMAGE_FORMAT", reason))?;

    let video_host_allowlist = match lookup("UNMARK_VIDEO_HOST_ALLOWLIST") {
        Ok(raw) => {
            let allowlist = HostAllowlist::from_csv(&raw);
            if allowlist.is_empty() {
                return Err(invalid(
                    "UNMARK_VIDEO_HOST_ALLOWLIST",
                    "no host prefixes given".to_string(),
                ));
            }
            allowlist
        }
        Err(_) => default_video_host_allowlist(),
    };

    let allowlist_max_hops = parse_u32("UNMARK_ALLOWLIST_MAX_HOPS", "5")?;
    let resolve_video_cdn = parse_bool(
        "UNMARK_RESOLVE_VIDEO_CDN",
        &or_default("UNMARK_RESOLVE_VIDEO_CDN", "false"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        mobile_user_agent,
        image_format,
        video_host_allowlist,
        allowlist_max_hops,
        resolve_video_cdn,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for values other than
/// `development`, `test`, and `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "UNMARK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
