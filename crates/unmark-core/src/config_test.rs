use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn assert_invalid(result: Result<AppConfig, ConfigError>, expected_var: &str) {
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "UNMARK_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_environment() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 10);
    assert_eq!(cfg.mobile_user_agent, DEFAULT_MOBILE_USER_AGENT);
    assert_eq!(cfg.image_format, ImageFormat::Jpg);
    assert_eq!(cfg.video_host_allowlist, default_video_host_allowlist());
    assert_eq!(cfg.allowlist_max_hops, 5);
    assert!(!cfg.resolve_video_cdn);
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("UNMARK_BIND_ADDR", "not-a-socket-addr");
    assert_invalid(build_app_config(lookup_from_map(&map)), "UNMARK_BIND_ADDR");
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("UNMARK_REQUEST_TIMEOUT_SECS", "30");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 30);
}

#[test]
fn request_timeout_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("UNMARK_REQUEST_TIMEOUT_SECS", "0");
    assert_invalid(
        build_app_config(lookup_from_map(&map)),
        "UNMARK_REQUEST_TIMEOUT_SECS",
    );
}

#[test]
fn request_timeout_rejects_garbage() {
    let mut map = HashMap::new();
    map.insert("UNMARK_REQUEST_TIMEOUT_SECS", "soon");
    assert_invalid(
        build_app_config(lookup_from_map(&map)),
        "UNMARK_REQUEST_TIMEOUT_SECS",
    );
}

#[test]
fn user_agent_overrides() {
    let mut map = HashMap::new();
    map.insert("UNMARK_MOBILE_USER_AGENT", "mobile-agent/1.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.mobile_user_agent, "mobile-agent/1.0");
}

#[test]
fn debug_lists_only_the_mobile_user_agent() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("mobile_user_agent"));
    assert!(!rendered.contains("desktop"));
}

#[test]
fn image_format_override() {
    let mut map = HashMap::new();
    map.insert("UNMARK_IMAGE_FORMAT", "webp");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.image_format, ImageFormat::Webp);
}

#[test]
fn image_format_rejects_unknown() {
    let mut map = HashMap::new();
    map.insert("UNMARK_IMAGE_FORMAT", "gif");
    assert_invalid(build_app_config(lookup_from_map(&map)), "UNMARK_IMAGE_FORMAT");
}

#[test]
fn allowlist_override_replaces_default_table() {
    let mut map = HashMap::new();
    map.insert(
        "UNMARK_VIDEO_HOST_ALLOWLIST",
        "https://cdn-a.example.com,https://cdn-b.example.com",
    );
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.video_host_allowlist.len(), 2);
    assert!(cfg
        .video_host_allowlist
        .matches("http://cdn-b.example.com/v.mp4"));
    assert!(!cfg
        .video_host_allowlist
        .matches("https://v26.douyinvod.com/v.mp4"));
}

#[test]
fn allowlist_override_rejects_empty_list() {
    let mut map = HashMap::new();
    map.insert("UNMARK_VIDEO_HOST_ALLOWLIST", " , ");
    assert_invalid(
        build_app_config(lookup_from_map(&map)),
        "UNMARK_VIDEO_HOST_ALLOWLIST",
    );
}

#[test]
fn allowlist_max_hops_override() {
    let mut map = HashMap::new();
    map.insert("UNMARK_ALLOWLIST_MAX_HOPS", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.allowlist_max_hops, 8);
}

#[test]
fn resolve_video_cdn_accepts_common_truthy_values() {
    for raw in ["1", "true", "YES", "on"] {
        let mut map = HashMap::new();
        map.insert("UNMARK_RESOLVE_VIDEO_CDN", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.resolve_video_cdn, "{raw} should enable CDN resolution");
    }
}

#[test]
fn resolve_video_cdn_rejects_garbage() {
    let mut map = HashMap::new();
    map.insert("UNMARK_RESOLVE_VIDEO_CDN", "maybe");
    assert_invalid(
        build_app_config(lookup_from_map(&map)),
        "UNMARK_RESOLVE_VIDEO_CDN",
    );
}

#[test]
fn debug_output_summarizes_allowlist() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(debug.contains("video_host_allowlist"));
    assert!(!debug.contains("douyinvod.com"));
}
