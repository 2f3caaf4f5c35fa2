//! Pulls one canonical URL out of free-form share text.
//!
//! Share text copied from the mobile apps mixes emoji, Chinese punctuation,
//! and a link, sometimes with the link mangled into a bare short code. The
//! extractor tries, in order: a text that already is a URL, the first
//! `http(s)://` token, then the two platform short-code shapes. A token ends
//! at whitespace or full-width punctuation, which never appears unescaped in
//! a real link.

use std::sync::LazyLock;

use regex::Regex;

static URL_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s。，、；：！？（）【】「」『』《》“”]+").expect("valid regex")
});
static TRAILING_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,;:!?)`]+$").expect("valid regex"));
static VIDEO_SHORT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z0-9]{3,}):\s*/\s*").expect("valid regex"));
static NOTE_SHORT_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9]{11}").expect("valid regex"));

const VIDEO_SHORT_LINK_BASE: &str = "https://v.douyin.com/";
const NOTE_SHORT_LINK_BASE: &str = "https://xhslink.com/";

/// Extracts the first usable URL from `text`.
///
/// Returns `None` when the text holds neither a URL nor a recognizable short
/// code. The short-code fallbacks are heuristics and can misfire on ordinary
/// alphanumeric runs; callers validate the platform afterwards.
#[must_use]
pub fn extract_url(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if URL_TOKEN_RE
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
    {
        tracing::debug!(url = text, "share text is already a URL");
        return Some(text.to_string());
    }

    let spaced = text.replace(['，', ','], " ");

    if let Some(m) = URL_TOKEN_RE.find(&spaced) {
        let url = TRAILING_PUNCT_RE.replace(m.as_str(), "").into_owned();
        tracing::debug!(url, "extracted URL from share text");
        return Some(url);
    }

    if let Some(code) = VIDEO_SHORT_CODE_RE
        .captures(&spaced)
        .and_then(|caps| caps.get(1))
    {
        let url = format!("{VIDEO_SHORT_LINK_BASE}{}", code.as_str());
        tracing::debug!(url, "rebuilt video short link from share code");
        return Some(url);
    }

    if let Some(code) = NOTE_SHORT_CODE_RE.find(&spaced) {
        let url = format!("{NOTE_SHORT_LINK_BASE}{}", code.as_str());
        tracing::debug!(url, "rebuilt note short link from share code");
        return Some(url);
    }

    tracing::debug!(text, "no URL found in share text");
    None
}

/// Returns `true` when `url` parses as an absolute `http` or `https` URL.
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    reqwest::Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

#[cfg(test)]
#[path = "share_text_test.rs"]
mod tests;
