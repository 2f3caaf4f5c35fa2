use thiserror::Error;

/// Failures that cross the analyzer boundary.
///
/// Anything softer (an unparsable script, a missing schema field, a URL
/// rewrite that could not be built) is logged and degrades the result
/// instead of surfacing here.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("share text is empty")]
    EmptyInput,

    #[error("no URL found in share text \"{text}\"")]
    UrlNotFound { text: String },

    #[error("unsupported platform for URL {url}")]
    UnsupportedPlatform { url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("link has expired or the content no longer exists: {url}")]
    DeadLink { url: String },
}

/// Coarse failure category, used by callers to pick a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing usable in the caller's input. Never retried.
    Input,
    /// Network failure or non-2xx status while reading a page.
    Fetch,
    /// The page was reached but the content is gone.
    DeadLink,
}

impl ScraperError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScraperError::EmptyInput
            | ScraperError::UrlNotFound { .. }
            | ScraperError::UnsupportedPlatform { .. } => ErrorKind::Input,
            ScraperError::Http(_) | ScraperError::UnexpectedStatus { .. } => ErrorKind::Fetch,
            ScraperError::DeadLink { .. } => ErrorKind::DeadLink,
        }
    }
}

/// Why one document yielded no embedded state. Logged by the analyzers,
/// never returned from them.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no script assigns {marker}")]
    MarkerNotFound { marker: String },

    #[error("embedded state after {marker} is unterminated")]
    Unterminated { marker: String },

    #[error("embedded state is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_classified_as_input() {
        assert_eq!(ScraperError::EmptyInput.kind(), ErrorKind::Input);
        let err = ScraperError::UrlNotFound {
            text: "nothing here".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn status_errors_are_classified_as_fetch() {
        let err = ScraperError::UnexpectedStatus {
            status: 503,
            url: "https://example.com".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(
            err.to_string(),
            "unexpected HTTP status 503 from https://example.com"
        );
    }

    #[test]
    fn dead_link_is_distinct_from_fetch() {
        let err = ScraperError::DeadLink {
            url: "https://www.xiaohongshu.com/404".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::DeadLink);
    }
}
