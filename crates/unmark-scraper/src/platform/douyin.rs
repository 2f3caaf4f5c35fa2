//! Video-platform analysis for `MediaExtractor`.

use unmark_core::MediaResult;

use super::{MediaExtractor, Platform};
use crate::embed::scan_embedded_state;
use crate::error::ScraperError;
use crate::schema::douyin::resolve_item;
use crate::types::NoteRecord;

const PLATFORM: Platform = Platform::Douyin;

impl MediaExtractor {
    /// Reads the post behind a video-platform share link.
    ///
    /// Images are taken as served; only the video URL is rewritten. When CDN
    /// resolution is enabled the video URL is additionally followed to an
    /// allowlisted content host.
    pub(super) async fn analyze_douyin(&self, url: String) -> Result<MediaResult, ScraperError> {
        let resolved = self
            .resolver
            .resolve(&url, PLATFORM.canonical_markers())
            .await;
        let document = self.fetcher.fetch_document(&resolved.final_url).await?;

        if document.looks_dead(PLATFORM.data_markers()) {
            tracing::info!(url = %document.final_url, "video page looks expired");
            return Err(ScraperError::DeadLink {
                url: document.final_url,
            });
        }

        let record = match scan_embedded_state(&document.html, PLATFORM.state_marker()) {
            Ok(state) => resolve_item(&state),
            Err(e) => {
                tracing::warn!(url = %document.final_url, error = %e, "no usable router data");
                NoteRecord::default()
            }
        };

        let video = match record.video.as_deref() {
            Some(video) if self.config.resolve_video_cdn => {
                let resolution = self
                    .resolver
                    .resolve_against_allowlist(video, self.config.allowlist_max_hops)
                    .await;
                resolution.url
            }
            Some(video) => video.to_owned(),
            None => String::new(),
        };

        let (image_list, _) = record.media_lists();
        let title = if document.title.is_empty() {
            record.title
        } else {
            document.title
        };

        Ok(MediaResult {
            url,
            final_url: document.final_url,
            title,
            description: record.description,
            image_list,
            live_list: None,
            video,
            app_type: PLATFORM.app_type(),
        })
    }
}
