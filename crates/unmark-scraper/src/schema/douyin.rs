//! Video-platform state (`window._ROUTER_DATA`).
//!
//! ```text
//! { "loaderData": {
//!     "video_(id)/page" | "note_(id)/page": {
//!       "videoInfoRes": { "item_list": [ {
//!         "desc": "...",
//!         "images": [ { "url_list": ["best", ...] }, ... ],
//!         "video": { "play_addr": { "url_list": ["best", ...] } }
//!       } ] } } } }
//! ```
//!
//! Image posts render under the note route and still carry a `video` whose
//! play address is the background track.

use serde_json::Value;

use super::{array_at, member, str_at, Probe};
use crate::embed::EmbeddedState;
use crate::normalize::normalize_video_url;
use crate::types::{ImageRef, NoteRecord};

pub const NOTE_ROUTE_KEY: &str = "note_(id)/page";
pub const VIDEO_ROUTE_KEY: &str = "video_(id)/page";

/// Loader key of the route the page rendered. The note route is chosen only
/// when its name appears in the state text.
#[must_use]
pub fn route_key(raw_json: &str) -> &'static str {
    if raw_json.contains("note_(id)") {
        NOTE_ROUTE_KEY
    } else {
        VIDEO_ROUTE_KEY
    }
}

/// Builds a record from the first item of the rendered route, falling back
/// to the video route when the note route carries no item. Title is left
/// empty; the page `<title>` supplies it.
#[must_use]
pub fn resolve_item(state: &EmbeddedState) -> NoteRecord {
    let key = route_key(&state.raw_json);
    let probe = probe_route(&state.tree, key).or_else(|| {
        (key != VIDEO_ROUTE_KEY)
            .then(|| probe_route(&state.tree, VIDEO_ROUTE_KEY))
            .flatten()
    });
    let Some(probe) = probe else {
        tracing::debug!(route = key, "route data missing from loader state");
        return NoteRecord::default();
    };

    let images: Vec<ImageRef> = probe
        .images
        .iter()
        .map(|image| {
            let url = str_at(image, "/url_list/0").unwrap_or_default();
            ImageRef {
                raw: url.clone(),
                resolved: url,
            }
        })
        .collect();

    NoteRecord {
        title: String::new(),
        description: probe.description.unwrap_or_default(),
        live_assets: vec![None; images.len()],
        images,
        video: probe.video.as_deref().and_then(normalize_video_url),
    }
}

fn probe_route<'a>(tree: &'a Value, key: &str) -> Option<Probe<'a>> {
    let item = member(tree.get("loaderData")?, key)?.pointer("/videoInfoRes/item_list/0")?;
    Some(Probe {
        source: "loader_route",
        title: None,
        description: str_at(item, "/desc"),
        images: array_at(item, "/images"),
        video: str_at(item, "/video/play_addr/url_list/0"),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn state(tree: Value) -> EmbeddedState {
        EmbeddedState {
            raw_json: tree.to_string(),
            tree,
        }
    }

    #[test]
    fn route_key_defaults_to_video() {
        assert_eq!(route_key(r#"{"loaderData":{}}"#), VIDEO_ROUTE_KEY);
        assert_eq!(
            route_key(r#"{"loaderData":{"note_(id)/page":{}}}"#),
            NOTE_ROUTE_KEY
        );
    }

    #[test]
    fn video_post_yields_clean_video_url() {
        let record = resolve_item(&state(json!({
            "loaderData": { "video_(id)/page": { "videoInfoRes": { "item_list": [{
                "desc": "今天的晚霞 #日落",
                "images": null,
                "video": { "play_addr": { "url_list": [
                    "https://aweme.snssdk.com/aweme/v1/playwm/?video_id=v0d00fg10000",
                    "https://backup.example.com/x"
                ] } }
            }] } } }
        })));

        assert_eq!(record.description, "今天的晚霞 #日落");
        assert!(record.images.is_empty());
        assert_eq!(
            record.video.as_deref(),
            Some("https://aweme.snssdk.com/aweme/v1/play/?video_id=v0d00fg10000")
        );
        assert_eq!(record.title, "");
    }

    #[test]
    fn image_post_takes_first_url_of_each_image_and_drops_audio() {
        let record = resolve_item(&state(json!({
            "loaderData": { "note_(id)/page": { "videoInfoRes": { "item_list": [{
                "desc": "图文",
                "images": [
                    { "url_list": ["https://p3.douyinpic.com/1.webp", "https://p9.douyinpic.com/1.webp"] },
                    { "url_list": [] },
                    { "url_list": ["https://p3.douyinpic.com/3.webp"] }
                ],
                "video": { "play_addr": { "url_list": ["https://sf3.douyinvod.com/obj/ies-music/bgm.mp3"] } }
            }] } } }
        })));

        let (images, live) = record.media_lists();
        assert_eq!(
            images,
            vec!["https://p3.douyinpic.com/1.webp", "https://p3.douyinpic.com/3.webp"]
        );
        assert_eq!(live, vec![None, None]);
        assert_eq!(record.video, None);
    }

    #[test]
    fn empty_note_route_falls_back_to_video_route() {
        let record = resolve_item(&state(json!({
            "loaderData": {
                "note_(id)/page": { "videoInfoRes": { "item_list": [] } },
                "video_(id)/page": { "videoInfoRes": { "item_list": [{
                    "desc": "换了路由",
                    "video": { "play_addr": { "url_list": [
                        "https://aweme.snssdk.com/aweme/v1/playwm/?video_id=v0200fg"
                    ] } }
                }] } }
            }
        })));

        assert_eq!(record.description, "换了路由");
        assert_eq!(
            record.video.as_deref(),
            Some("https://aweme.snssdk.com/aweme/v1/play/?video_id=v0200fg")
        );
    }

    #[test]
    fn missing_paths_degrade_to_empty_record() {
        for tree in [
            json!({}),
            json!({"loaderData": null}),
            json!({"loaderData": {"video_(id)/page": {"videoInfoRes": {"item_list": []}}}}),
            json!({"loaderData": {"video_(id)/page": {"videoInfoRes": {"item_list": [{"desc": 5}]}}}}),
        ] {
            assert_eq!(resolve_item(&state(tree)), NoteRecord::default());
        }
    }
}
