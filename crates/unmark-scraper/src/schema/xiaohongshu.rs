//! Note-platform state (`window.__INITIAL_STATE__`).
//!
//! ## Observed shapes
//!
//! ### Current pages
//! ```text
//! { "noteData": {
//!     "normalNotePreloadData": { "title", "desc", "imagesList": [...] },
//!     "data": { "noteData": { "title", "desc", "imageList": [...],
//!                             "video": { "media": { "stream": { "h264": [ { "masterUrl" } ] } } } } } } }
//! ```
//! The preload object is rendered first and sometimes holds a single
//! placeholder image while `data.noteData` holds the full set.
//!
//! ### Legacy pages
//! ```text
//! { "note": { "firstNoteId": "abc",
//!             "noteDetailMap": { "abc": { "note": { same fields as data.noteData } } } } }
//! ```
//! `firstNoteId` can be missing or name an id absent from the map; the first
//! entry of the map is used then.

use serde_json::Value;
use unmark_core::ImageFormat;

use super::{array_at, str_at, Probe};
use crate::normalize::{live_companion, normalize_image_entry, normalize_video_url};
use crate::types::{ImageRef, NoteRecord};

/// Builds a record from whichever state generation the page carries.
///
/// Title and description come from the preload object first, then from the
/// note object, field by field. The image list comes from whichever source
/// has strictly more images; on a tie the preload list is kept. Fields no
/// probe supplies stay empty for the caller to fill from the page markup.
#[must_use]
pub fn resolve_note(tree: &Value, format: ImageFormat) -> NoteRecord {
    let preload = probe_preload(tree);
    let note = probe_current_note(tree).or_else(|| probe_legacy_note(tree));

    let title = preload
        .as_ref()
        .and_then(|p| p.title.clone())
        .or_else(|| note.as_ref().and_then(|n| n.title.clone()))
        .unwrap_or_default();
    let description = preload
        .as_ref()
        .and_then(|p| p.description.clone())
        .or_else(|| note.as_ref().and_then(|n| n.description.clone()))
        .unwrap_or_default();

    let chosen = pick_image_source(preload.as_ref(), note.as_ref());
    let (images, live_assets) = match chosen {
        Some(probe) => {
            tracing::debug!(source = probe.source, count = probe.images.len(), "selected image source");
            project_images(probe.images, format)
        }
        None => (Vec::new(), Vec::new()),
    };

    let video = note
        .as_ref()
        .and_then(|n| n.video.as_deref())
        .and_then(normalize_video_url);

    NoteRecord {
        title,
        description,
        images,
        video,
        live_assets,
    }
}

/// More images wins; preload wins ties.
fn pick_image_source<'p, 'a>(
    preload: Option<&'p Probe<'a>>,
    note: Option<&'p Probe<'a>>,
) -> Option<&'p Probe<'a>> {
    match (preload, note) {
        (Some(p), Some(n)) if n.images.len() > p.images.len() => Some(n),
        (Some(p), _) => Some(p),
        (None, n) => n,
    }
}

fn project_images(entries: &[Value], format: ImageFormat) -> (Vec<ImageRef>, Vec<Option<String>>) {
    entries
        .iter()
        .map(|entry| (normalize_image_entry(entry, format), live_companion(entry)))
        .unzip()
}

fn probe_preload(tree: &Value) -> Option<Probe<'_>> {
    let preload = tree.pointer("/noteData/normalNotePreloadData")?;
    preload.is_object().then(|| Probe {
        source: "preload",
        title: str_at(preload, "/title"),
        description: str_at(preload, "/desc"),
        images: array_at(preload, "/imagesList"),
        video: None,
    })
}

fn probe_current_note(tree: &Value) -> Option<Probe<'_>> {
    tree.pointer("/noteData/data/noteData")
        .and_then(|note| note_probe(note, "note_data"))
}

fn probe_legacy_note(tree: &Value) -> Option<Probe<'_>> {
    let detail_map = tree.pointer("/note/noteDetailMap")?.as_object()?;
    let first_id = str_at(tree, "/note/firstNoteId");

    let by_id = first_id
        .as_deref()
        .and_then(|id| detail_map.get(id))
        .and_then(|entry| entry.get("note"));
    let note = by_id.or_else(|| {
        tracing::debug!(first_id = ?first_id, "firstNoteId missing or stale; using first map entry");
        detail_map.values().find_map(|entry| entry.get("note").filter(|n| n.is_object()))
    })?;

    note_probe(note, "note_detail_map")
}

fn note_probe<'a>(note: &'a Value, source: &'static str) -> Option<Probe<'a>> {
    note.is_object().then(|| Probe {
        source,
        title: str_at(note, "/title"),
        description: str_at(note, "/desc"),
        images: array_at(note, "/imageList"),
        video: str_at(note, "/video/media/stream/h264/0/masterUrl"),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn image(url: &str) -> Value {
        json!({ "urlDefault": url })
    }

    fn resolve(tree: &Value) -> NoteRecord {
        resolve_note(tree, ImageFormat::Jpg)
    }

    #[test]
    fn detail_images_win_when_preload_has_fewer() {
        let tree = json!({ "noteData": {
            "normalNotePreloadData": {
                "title": "preload title",
                "imagesList": [image("https://i/placeholder.jpg")]
            },
            "data": { "noteData": {
                "title": "note title",
                "desc": "note desc",
                "imageList": [image("https://i/1.jpg"), image("https://i/2.jpg"), image("https://i/3.jpg")]
            } }
        } });

        let record = resolve(&tree);
        assert_eq!(record.images.len(), 3);
        assert_eq!(record.images[0].resolved, "https://i/1.jpg");
        assert_eq!(record.title, "preload title");
        assert_eq!(record.description, "note desc");
    }

    #[test]
    fn preload_images_win_ties() {
        let tree = json!({ "noteData": {
            "normalNotePreloadData": { "imagesList": [image("https://i/pre.jpg")] },
            "data": { "noteData": { "imageList": [image("https://i/note.jpg")] } }
        } });

        let record = resolve(&tree);
        assert_eq!(record.images.len(), 1);
        assert_eq!(record.images[0].resolved, "https://i/pre.jpg");
    }

    #[test]
    fn preload_images_win_when_longer() {
        let tree = json!({ "noteData": {
            "normalNotePreloadData": { "imagesList": [image("https://i/a.jpg"), image("https://i/b.jpg")] },
            "data": { "noteData": { "imageList": [image("https://i/note.jpg")] } }
        } });

        assert_eq!(resolve(&tree).images.len(), 2);
    }

    #[test]
    fn empty_preload_strings_fall_back_per_field() {
        let tree = json!({ "noteData": {
            "normalNotePreloadData": { "title": "", "desc": "preload desc" },
            "data": { "noteData": { "title": "note title", "desc": "note desc" } }
        } });

        let record = resolve(&tree);
        assert_eq!(record.title, "note title");
        assert_eq!(record.description, "preload desc");
    }

    #[test]
    fn legacy_detail_map_uses_first_note_id() {
        let tree = json!({ "note": {
            "firstNoteId": "b",
            "noteDetailMap": {
                "a": { "note": { "title": "wrong" } },
                "b": { "note": {
                    "title": "right",
                    "imageList": [image("https://i/1.jpg")],
                    "video": { "media": { "stream": { "h264": [{ "masterUrl": "https://sns-video.example.com/v.mp4" }] } } }
                } }
            }
        } });

        let record = resolve(&tree);
        assert_eq!(record.title, "right");
        assert_eq!(record.images.len(), 1);
        assert_eq!(record.video.as_deref(), Some("https://sns-video.example.com/v.mp4"));
    }

    #[test]
    fn legacy_detail_map_falls_back_to_first_entry_when_id_is_stale() {
        let tree = json!({ "note": {
            "firstNoteId": "gone",
            "noteDetailMap": {
                "z": { "note": { "title": "first in document order" } },
                "a": { "note": { "title": "second" } }
            }
        } });

        assert_eq!(resolve(&tree).title, "first in document order");
    }

    #[test]
    fn live_assets_stay_parallel_to_images() {
        let tree = json!({ "noteData": { "data": { "noteData": { "imageList": [
            { "urlDefault": "https://i/1.jpg", "livePhoto": true,
              "stream": { "h264": [{ "masterUrl": "https://v/1.mp4" }] } },
            { "urlDefault": "https://i/2.jpg" },
            { "urlDefault": "https://i/3.jpg", "videoUrl": "https://v/3.mp4" }
        ] } } } });

        let record = resolve(&tree);
        assert_eq!(record.images.len(), record.live_assets.len());
        assert_eq!(
            record.live_assets,
            vec![
                Some("https://v/1.mp4".to_string()),
                None,
                Some("https://v/3.mp4".to_string())
            ]
        );
    }

    #[test]
    fn unknown_shapes_degrade_to_empty_record() {
        for tree in [
            json!({}),
            json!({ "noteData": null }),
            json!({ "noteData": { "data": { "noteData": "oops" } } }),
            json!({ "note": { "noteDetailMap": {} } }),
            json!({ "note": { "noteDetailMap": { "a": { "note": null } } } }),
        ] {
            assert_eq!(resolve(&tree), NoteRecord::default(), "tree: {tree}");
        }
    }
}
