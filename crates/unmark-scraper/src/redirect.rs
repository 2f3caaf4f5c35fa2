//! Short-link resolution.
//!
//! Redirects are followed one hop at a time with automatic following turned
//! off, so every intermediate address is visible to the caller.

use std::time::Duration;

use reqwest::{redirect, Client, Url};
use unmark_core::HostAllowlist;

use crate::error::ScraperError;

/// Outcome of [`RedirectResolver::resolve`].
///
/// `final_url` is the redirect target, or equals `original` when the URL
/// needed no resolution or resolution failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub original: String,
    pub final_url: String,
}

impl ResolvedUrl {
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        self.original != self.final_url
    }
}

/// Outcome of [`RedirectResolver::resolve_against_allowlist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowlistResolution {
    /// Allowlisted address when `matched`, otherwise the last address reached.
    pub url: String,
    /// Redirect hops actually followed.
    pub hops: u32,
    pub matched: bool,
}

pub struct RedirectResolver {
    client: Client,
    allowlist: HostAllowlist,
}

impl RedirectResolver {
    /// Creates a resolver whose probes time out after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        allowlist: HostAllowlist,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self { client, allowlist })
    }

    /// Follows one redirect from `url`. Never fails: probe errors are logged
    /// and the input comes back unchanged.
    ///
    /// URLs containing any of `canonical_markers` are already permanent
    /// links and are returned without a request.
    pub async fn resolve(&self, url: &str, canonical_markers: &[&str]) -> ResolvedUrl {
        if canonical_markers.iter().any(|m| url.contains(m)) {
            tracing::debug!(url, "URL is already canonical; skipping redirect probe");
            return ResolvedUrl {
                original: url.to_owned(),
                final_url: url.to_owned(),
            };
        }

        let final_url = match self.next_hop(url).await {
            Ok(Some(location)) => {
                tracing::info!(from = url, to = %location, "resolved short link");
                location
            }
            Ok(None) => url.to_owned(),
            Err(e) => {
                tracing::warn!(url, error = %e, "redirect probe failed; using original URL");
                url.to_owned()
            }
        };

        ResolvedUrl {
            original: url.to_owned(),
            final_url,
        }
    }

    /// Follows redirects from `url` one hop at a time until an address on
    /// the host allowlist is reached, spending at most `max_attempts` probes.
    ///
    /// A failed probe is retried against the same address while attempts
    /// remain. An address that answers without redirecting ends the walk.
    pub async fn resolve_against_allowlist(
        &self,
        url: &str,
        max_attempts: u32,
    ) -> AllowlistResolution {
        let mut current = url.to_owned();
        let mut hops = 0;

        if self.allowlist.matches(&current) {
            return AllowlistResolution {
                url: current,
                hops: 0,
                matched: true,
            };
        }

        for attempt in 1..=max_attempts {
            let next = match self.next_hop(&current).await {
                Ok(Some(next)) => next,
                Ok(None) => {
                    tracing::debug!(url = %current, attempt, "no further redirect");
                    break;
                }
                Err(e) => {
                    tracing::warn!(url = %current, attempt, error = %e, "redirect probe failed; retrying");
                    continue;
                }
            };

            hops += 1;
            tracing::debug!(from = %current, to = %next, hops, "followed redirect hop");
            current = next;

            if self.allowlist.matches(&current) {
                tracing::info!(url = %current, hops, "reached allowlisted host");
                return AllowlistResolution {
                    url: current,
                    hops,
                    matched: true,
                };
            }
        }

        tracing::warn!(
            start = url,
            last = %current,
            max_attempts,
            "no allowlisted host reached; returning last address"
        );
        AllowlistResolution {
            url: current,
            hops,
            matched: false,
        }
    }

    /// Single `HEAD` probe. `Some(target)` on a 3xx carrying `Location`,
    /// resolved against `url` when relative.
    async fn next_hop(&self, url: &str) -> Result<Option<String>, reqwest::Error> {
        let response = self.client.head(url).send().await?;
        if !response.status().is_redirection() {
            return Ok(None);
        }

        let Some(location) = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        else {
            return Ok(None);
        };

        let target = match Url::parse(url).and_then(|base| base.join(location)) {
            Ok(joined) => joined.to_string(),
            Err(_) => location.to_owned(),
        };
        Ok(Some(target))
    }
}
