//! Intermediate records produced between page fetch and the final
//! [`unmark_core::MediaResult`].
//!
//! These are returned as plain values so callers and tests can observe each
//! stage of an analysis without hooking into the analyzers.

use serde::Serialize;

/// One image of a post: the candidate URL read from the page state and the
/// form that should actually be downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// Highest-preference URL found in the state tree, untouched.
    pub raw: String,
    /// Watermark-free form of `raw`. Empty when the entry carried no URL.
    pub resolved: String,
}

/// Platform-neutral view of one post after schema resolution.
///
/// `images` and `live_assets` are parallel: `live_assets[i]` is the motion
/// companion of `images[i]`, or `None` when that image is a plain still.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteRecord {
    pub title: String,
    pub description: String,
    pub images: Vec<ImageRef>,
    pub video: Option<String>,
    pub live_assets: Vec<Option<String>>,
}

impl NoteRecord {
    /// Image URLs that survived normalization, with their live companions
    /// kept aligned index-for-index.
    #[must_use]
    pub fn media_lists(&self) -> (Vec<String>, Vec<Option<String>>) {
        self.images
            .iter()
            .zip(
                self.live_assets
                    .iter()
                    .cloned()
                    .chain(std::iter::repeat(None)),
            )
            .filter(|(image, _)| !image.resolved.is_empty())
            .map(|(image, live)| (image.resolved.clone(), live))
            .unzip()
    }
}
