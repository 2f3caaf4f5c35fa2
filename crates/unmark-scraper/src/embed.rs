//! Extraction of the JSON state object a page assigns to a global variable
//! inside one of its `<script>` tags.
//!
//! The assignment is usually followed by more statements in the same script,
//! so the object's end is found by brace matching rather than by taking the
//! rest of the script text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScanError;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid regex"));

/// State object recovered from a page.
#[derive(Debug, Clone)]
pub struct EmbeddedState {
    /// Exact object text as it appeared in the script, before sanitizing.
    pub raw_json: String,
    pub tree: serde_json::Value,
}

/// Finds the first script assigning an object to `marker` (for example
/// `window.__INITIAL_STATE__`) whose object text can be isolated and parsed.
///
/// A script that matches but is truncated or unparsable is logged and
/// skipped in favour of the next matching script.
///
/// # Errors
///
/// Returns the failure of the last candidate script, or
/// [`ScanError::MarkerNotFound`] when no script mentions `marker`.
pub fn scan_embedded_state(html: &str, marker: &str) -> Result<EmbeddedState, ScanError> {
    let mut last_error = ScanError::MarkerNotFound {
        marker: marker.to_owned(),
    };

    for (index, script) in script_contents(html)
        .filter(|s| s.contains(marker))
        .enumerate()
    {
        match parse_candidate(script, marker) {
            Ok(state) => {
                tracing::debug!(marker, index, bytes = state.raw_json.len(), "found embedded state");
                return Ok(state);
            }
            Err(e) => {
                tracing::warn!(marker, index, error = %e, "skipping embedded state candidate");
                last_error = e;
            }
        }
    }

    Err(last_error)
}

fn parse_candidate(script: &str, marker: &str) -> Result<EmbeddedState, ScanError> {
    let start = assigned_object_start(script, marker).ok_or_else(|| ScanError::MarkerNotFound {
        marker: marker.to_owned(),
    })?;
    let raw = extract_balanced_object(start).ok_or_else(|| ScanError::Unterminated {
        marker: marker.to_owned(),
    })?;
    let tree = serde_json::from_str(&sanitize_undefined(raw))?;
    Ok(EmbeddedState {
        raw_json: raw.to_owned(),
        tree,
    })
}

fn script_contents(html: &str) -> impl Iterator<Item = &str> {
    SCRIPT_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .filter(|content| !content.is_empty())
}

/// Returns the script text starting at the `{` assigned to `marker`.
///
/// Whitespace around `=` is allowed. Occurrences of `marker` that are not
/// an object assignment (reads, comparisons) are skipped.
fn assigned_object_start<'a>(script: &'a str, marker: &str) -> Option<&'a str> {
    script.match_indices(marker).find_map(|(pos, _)| {
        let rest = script[pos + marker.len()..].trim_start();
        let rest = rest.strip_prefix('=')?;
        if rest.starts_with('=') {
            return None;
        }
        let rest = rest.trim_start();
        rest.starts_with('{').then_some(rest)
    })
}

/// Try to extract a balanced JSON object from the start of `s`.
///
/// Scans `s` character-by-character tracking brace depth, respecting string
/// literals and escape sequences. Returns the shortest prefix of `s` that
/// forms a complete `{…}` object, or `None` if the object is unterminated.
#[must_use]
pub fn extract_balanced_object(s: &str) -> Option<&str> {
    if !s.starts_with('{') {
        return None;
    }
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escape = false;
    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rewrites bare `undefined` tokens to `null` so the text parses as JSON.
///
/// Occurrences inside string literals and as part of a longer identifier
/// are left alone.
#[must_use]
pub fn sanitize_undefined(text: &str) -> Cow<'_, str> {
    const TOKEN: &[u8] = b"undefined";

    if !text.contains("undefined") {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied_up_to = 0;
    let mut in_string = false;
    let mut escape = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }
        if bytes[i..].starts_with(TOKEN) {
            let end = i + TOKEN.len();
            let bounded_left = i == 0 || !is_ident_byte(bytes[i - 1]);
            let bounded_right = end == bytes.len() || !is_ident_byte(bytes[end]);
            if bounded_left && bounded_right {
                out.push_str(&text[copied_up_to..i]);
                out.push_str("null");
                copied_up_to = end;
                i = end;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&text[copied_up_to..]);
    Cow::Owned(out)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[cfg(test)]
#[path = "embed_test.rs"]
mod tests;
