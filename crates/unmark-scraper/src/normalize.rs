//! Rewrites media URLs to their watermark-free variants.
//!
//! ## Observed URL conventions
//!
//! ### Video
//! The video platform serves its player from `…/aweme/v1/playwm/?video_id=…`.
//! The same path with the `playwm` segment replaced by `play` serves the
//! clip without the overlay. Audio-only posts sometimes put an `.mp3` (or
//! `m4a`) transcode in the video field; those are not playable video.
//!
//! ### Images
//! Note-platform image entries carry up to three URL fields, best first:
//! `urlSizeLarge`, `url`, `urlDefault`. URLs under a `notes_pre_post` path
//! are the uploaded originals and carry no watermark. URLs keyed by a bare
//! UUID are rendered with the overlay unless an explicit `imageView2`
//! rendition is requested.
//!
//! ### Live photos
//! A motion companion may sit under `livePhoto.stream.h264[0].masterUrl`,
//! `stream.h264[0].masterUrl`, or as a plain string in `livePhoto` or
//! `videoUrl`. `livePhoto` is also used as a boolean flag, which is ignored.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use unmark_core::ImageFormat;

use crate::types::ImageRef;

static AUDIO_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9])(?:mp3|m4a)(?:[^a-z0-9]|$)").expect("valid regex")
});
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("valid regex")
});

const WATERMARKED_SEGMENT: &str = "playwm";
const CLEAN_SEGMENT: &str = "play";

/// Path marker of original, watermark-free uploads.
const ORIGINAL_UPLOAD_MARKER: &str = "notes_pre_post";

/// Present in any URL that already requests an explicit rendition.
const RENDITION_QUERY_MARKER: &str = "imageView2";

/// Note-platform image URL fields in order of preference.
pub const IMAGE_URL_FIELDS: [&str; 3] = ["urlSizeLarge", "url", "urlDefault"];

/// Live-photo companion locations in order of preference.
const LIVE_ASSET_POINTERS: [&str; 4] = [
    "/livePhoto/stream/h264/0/masterUrl",
    "/stream/h264/0/masterUrl",
    "/livePhoto",
    "/videoUrl",
];

/// Returns the watermark-free form of a video URL, or `None` when the URL is
/// empty or points at an audio file.
#[must_use]
pub fn normalize_video_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if AUDIO_TOKEN_RE.is_match(raw) {
        tracing::debug!(url = raw, "discarding audio URL in video field");
        return None;
    }
    Some(strip_watermark_segment(raw))
}

/// Replaces a `playwm` path segment with `play`. Everything else, including
/// any `playwm` text in the query string, is left untouched.
fn strip_watermark_segment(url: &str) -> String {
    let path_end = url.find(['?', '#']).unwrap_or(url.len());
    let segment = url[..path_end].match_indices(WATERMARKED_SEGMENT).find(|(pos, _)| {
        let end = pos + WATERMARKED_SEGMENT.len();
        let starts_segment = url[..*pos].ends_with('/');
        let ends_segment = end == path_end || url[end..].starts_with('/');
        starts_segment && ends_segment
    });

    match segment {
        Some((pos, _)) => {
            let end = pos + WATERMARKED_SEGMENT.len();
            format!("{}{CLEAN_SEGMENT}{}", &url[..pos], &url[end..])
        }
        None => url.to_owned(),
    }
}

/// Picks the best URL of a note-platform image entry and rewrites it to a
/// watermark-free rendition when it can.
#[must_use]
pub fn normalize_image_entry(entry: &Value, format: ImageFormat) -> ImageRef {
    let candidates: Vec<&str> = IMAGE_URL_FIELDS
        .iter()
        .filter_map(|field| entry.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .collect();
    select_image(&candidates, format)
}

/// Chooses among alternative URLs for one image, best first.
///
/// An original-upload URL wins outright. Otherwise the first candidate is
/// used, with a rendition query appended when it is UUID-keyed.
#[must_use]
pub fn select_image(candidates: &[&str], format: ImageFormat) -> ImageRef {
    if let Some(original) = candidates
        .iter()
        .find(|url| url.contains(ORIGINAL_UPLOAD_MARKER))
    {
        return ImageRef {
            raw: (*original).to_owned(),
            resolved: (*original).to_owned(),
        };
    }

    let Some(first) = candidates.first() else {
        return ImageRef::default();
    };

    let resolved = if UUID_RE.is_match(first) {
        request_rendition(first, format).unwrap_or_else(|| (*first).to_owned())
    } else {
        (*first).to_owned()
    };

    ImageRef {
        raw: (*first).to_owned(),
        resolved,
    }
}

/// Appends `imageView2/2/w/1080/format/<fmt>` to `url` unless it already
/// requests a rendition. Returns `None` when `url` is not a usable absolute
/// URL, in which case callers keep it as-is.
#[must_use]
pub fn request_rendition(url: &str, format: ImageFormat) -> Option<String> {
    if url.contains(RENDITION_QUERY_MARKER) {
        return Some(url.to_owned());
    }
    if let Err(e) = reqwest::Url::parse(url) {
        tracing::warn!(url, error = %e, "cannot build rendition query; keeping original URL");
        return None;
    }

    let (base, fragment) = match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    let separator = if base.contains('?') { '&' } else { '?' };
    Some(format!(
        "{base}{separator}{RENDITION_QUERY_MARKER}/2/w/1080/format/{}{fragment}",
        format.as_str()
    ))
}

/// First non-empty live-photo companion URL of an image entry.
#[must_use]
pub fn live_companion(entry: &Value) -> Option<String> {
    LIVE_ASSET_POINTERS.iter().find_map(|pointer| {
        entry
            .pointer(pointer)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
