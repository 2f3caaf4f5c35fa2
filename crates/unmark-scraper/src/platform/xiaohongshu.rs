//! Note-platform analysis for `MediaExtractor`.

use unmark_core::{ImageFormat, MediaResult};

use super::{has_not_found_segment, MediaExtractor, Platform};
use crate::embed::scan_embedded_state;
use crate::error::ScraperError;
use crate::schema::xiaohongshu::resolve_note;
use crate::types::NoteRecord;

const PLATFORM: Platform = Platform::Xiaohongshu;

impl MediaExtractor {
    /// Reads the note behind a note-platform share link.
    ///
    /// Expired share links redirect to a `/404` page, so the redirect target
    /// is checked before anything is fetched.
    pub(super) async fn analyze_xiaohongshu(
        &self,
        url: String,
        format: ImageFormat,
    ) -> Result<MediaResult, ScraperError> {
        let resolved = self
            .resolver
            .resolve(&url, PLATFORM.canonical_markers())
            .await;
        if has_not_found_segment(&resolved.final_url) {
            tracing::info!(url = %resolved.final_url, "share link redirects to not-found page");
            return Err(ScraperError::DeadLink {
                url: resolved.final_url,
            });
        }

        let document = self.fetcher.fetch_document(&resolved.final_url).await?;
        if has_not_found_segment(&document.final_url) || document.looks_dead(PLATFORM.data_markers())
        {
            tracing::info!(url = %document.final_url, "note page looks expired");
            return Err(ScraperError::DeadLink {
                url: document.final_url,
            });
        }

        let record = match scan_embedded_state(&document.html, PLATFORM.state_marker()) {
            Ok(state) => resolve_note(&state.tree, format),
            Err(e) => {
                tracing::warn!(url = %document.final_url, error = %e, "no usable initial state");
                NoteRecord::default()
            }
        };

        let (image_list, live_list) = record.media_lists();
        let title = if record.title.is_empty() {
            document.title
        } else {
            record.title
        };
        let description = if record.description.is_empty() {
            document.meta_description.unwrap_or_default()
        } else {
            record.description
        };

        Ok(MediaResult {
            url,
            final_url: document.final_url,
            title,
            description,
            image_list,
            live_list: Some(live_list),
            video: record.video.unwrap_or_default(),
            app_type: PLATFORM.app_type(),
        })
    }
}
