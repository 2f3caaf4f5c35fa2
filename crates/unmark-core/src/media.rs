use serde::{Deserialize, Serialize};

/// Source platform tag carried on every [`MediaResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    /// Short-video platform (`douyin.com`).
    Douyin,
    /// Note / image-post platform (`xiaohongshu.com`).
    Xiaohongshu,
}

impl AppType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AppType::Douyin => "douyin",
            AppType::Xiaohongshu => "xiaohongshu",
        }
    }
}

impl std::fmt::Display for AppType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "douyin" => Ok(AppType::Douyin),
            "xiaohongshu" => Ok(AppType::Xiaohongshu),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// Image rendition requested when an image URL has to be rewritten to its
/// un-watermarked form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpg,
    Png,
    Webp,
}

impl ImageFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "png" => Ok(ImageFormat::Png),
            "webp" => Ok(ImageFormat::Webp),
            other => Err(format!("unsupported image format '{other}'")),
        }
    }
}

/// The externally visible result of analyzing one share text.
///
/// `live_list` is only populated for platforms with live-photo support; when
/// present it has exactly one entry per `image_list` entry, `None` marking an
/// image without a motion companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaResult {
    /// URL extracted from the share text.
    pub url: String,
    /// Canonical URL the content was actually read from.
    pub final_url: String,
    pub title: String,
    pub description: String,
    pub image_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_list: Option<Vec<Option<String>>>,
    /// Watermark-free video URL, empty when the post has no playable video.
    pub video: String,
    pub app_type: AppType,
}

impl MediaResult {
    /// Returns `true` when neither images nor a video were recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image_list.is_empty() && self.video.is_empty()
    }
}
