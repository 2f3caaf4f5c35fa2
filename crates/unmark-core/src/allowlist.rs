//! Content-host allowlist for the video platform's CDN family.
//!
//! The table is data, not policy: [`AppConfig`](crate::AppConfig) replaces
//! it wholesale when `UNMARK_VIDEO_HOST_ALLOWLIST` is set.

const DEFAULT_VIDEO_HOSTS: &[&str] = &[
    "https://txmov2.a.yximgs.com",
    "https://v1-cold.douyinvod.com",
    "https://v1-y.douyinvod.com",
    "https://v1.douyinvod.com",
    "https://v11-x.douyinvod.com",
    "https://v11.douyinvod.com",
    "https://v26-cold.douyinvod.com",
    "https://v26.douyinvod.com",
    "https://v29-cold.douyinvod.com",
    "https://v29.douyinvod.com",
    "https://v3-a.douyinvod.com",
    "https://v3-b.douyinvod.com",
    "https://v3-c.douyinvod.com",
    "https://v3-cold.douyinvod.com",
    "https://v3-d.douyinvod.com",
    "https://v3-e.douyinvod.com",
    "https://v3-x.douyinvod.com",
    "https://v3-y.douyinvod.com",
    "https://v3-z.douyinvod.com",
    "https://v5-cold.douyinvod.com",
    "https://v5-coldb.douyinvod.com",
    "https://v5-coldc.douyinvod.com",
    "https://v5-coldy.douyinvod.com",
    "https://v5-e.douyinvod.com",
    "https://v5-f.douyinvod.com",
    "https://v5-g.douyinvod.com",
    "https://v5-h.douyinvod.com",
    "https://v5-i.douyinvod.com",
    "https://v5-j.douyinvod.com",
    "https://v6-cold.douyinvod.com",
    "https://v6-x.douyinvod.com",
    "https://v6-y.douyinvod.com",
    "https://v6-z.douyinvod.com",
    "https://v6.douyinvod.com",
    "https://v83-c.douyinvod.com",
    "https://v83-d.douyinvod.com",
    "https://v83-x.douyinvod.com",
    "https://v83-y.douyinvod.com",
    "https://v83-z.douyinvod.com",
    "https://v83.douyinvod.com",
    "https://v9-cold.douyinvod.com",
    "https://v9-x.douyinvod.com",
    "https://v9-z.douyinvod.com",
    "https://v9.douyinvod.com",
    "https://v95.douyinvod.com",
    "https://v95-sz-cold.douyinvod.com",
];

/// Returns the built-in list of trusted video content-host prefixes.
#[must_use]
pub fn default_video_host_allowlist() -> HostAllowlist {
    HostAllowlist::new(DEFAULT_VIDEO_HOSTS.iter().copied())
}

/// A set of content-host prefixes such as `"https://v26.douyinvod.com"`.
///
/// Matching ignores the scheme: an entry matches any URL whose text contains
/// the entry's host portion, so `http://` and `https://` addresses are both
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAllowlist {
    hosts: Vec<String>,
}

impl HostAllowlist {
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = entries
            .into_iter()
            .filter_map(|entry| host_portion(entry.as_ref()))
            .collect();
        Self { hosts }
    }

    /// Parses a comma-separated list of prefixes. Blank entries are skipped.
    #[must_use]
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        self.hosts.iter().any(|host| url.contains(host.as_str()))
    }
}

impl Default for HostAllowlist {
    fn default() -> Self {
        default_video_host_allowlist()
    }
}

fn host_portion(entry: &str) -> Option<String> {
    let trimmed = entry.trim();
    let lowered = trimmed.to_ascii_lowercase();
    let without_scheme = if lowered.starts_with("https://") {
        &trimmed["https://".len()..]
    } else if lowered.starts_with("http://") {
        &trimmed["http://".len()..]
    } else {
        trimmed
    };
    let host = without_scheme.split('/').next().unwrap_or_default();
    (!host.is_empty()).then(|| host.to_string())
}
