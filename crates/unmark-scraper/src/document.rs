//! A fetched HTML page plus the few fields read straight from its markup.

use std::sync::LazyLock;

use regex::Regex;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);").expect("valid regex")
});

/// Substrings that show up on the platforms' "not found" pages.
const ERROR_SIGNALS: [&str; 4] = ["404", "页面不存在", "页面未找到", "内容不存在"];

/// Real content pages are far larger than this; anything shorter is an
/// error stub or an empty shell.
const MIN_CONTENT_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct PageDocument {
    pub html: String,
    /// Text of the first `<title>`, entity-decoded and trimmed.
    pub title: String,
    /// `<meta name="description">`, else `<meta property="og:description">`.
    pub meta_description: Option<String>,
    /// Address the body was read from after transport-level redirects.
    pub final_url: String,
}

impl PageDocument {
    #[must_use]
    pub fn new(html: String, final_url: String) -> Self {
        let title = extract_title(&html);
        let meta_description = find_meta_content(&html, "name", "description")
            .or_else(|| find_meta_content(&html, "property", "og:description"));
        Self {
            html,
            title,
            meta_description,
            final_url,
        }
    }

    /// A page is dead when it shows an error signal and none of the
    /// platform's own `data_markers`.
    ///
    /// Both halves are needed: healthy pages routinely contain `404` inside
    /// asset hashes, and error stubs sometimes mention the platform name.
    #[must_use]
    pub fn looks_dead(&self, data_markers: &[&str]) -> bool {
        let has_error_signal = ERROR_SIGNALS.iter().any(|s| self.html.contains(s))
            || self.html.chars().count() < MIN_CONTENT_CHARS;
        let has_data_marker = data_markers.iter().any(|m| self.html.contains(m));
        has_error_signal && !has_data_marker
    }
}

fn extract_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
        .unwrap_or_default()
}

/// Returns the non-empty `content` of the first `<meta>` whose `key_attr`
/// equals `key_value` (ASCII case-insensitive).
pub(crate) fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if !key.eq_ignore_ascii_case(key_value) {
            return None;
        }
        let content = decode_entities(&extract_attr(tag, "content")?);
        let content = content.trim();
        (!content.is_empty()).then(|| content.to_string())
    })
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)\b{}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(attr)
    );
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(tag)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Decodes the named entities that appear in titles and meta tags, plus
/// decimal and hex character references. Unknown entities are left as-is.
pub(crate) fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let body = &caps[1];
            let decoded = match body {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => body.strip_prefix('#').and_then(|num| {
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
