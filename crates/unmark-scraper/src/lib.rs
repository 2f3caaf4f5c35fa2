pub mod client;
pub mod config;
pub mod document;
pub mod embed;
pub mod error;
pub mod normalize;
pub mod platform;
pub mod redirect;
pub mod schema;
pub mod share_text;
pub mod types;

pub use client::Fetcher;
pub use config::ScraperConfig;
pub use document::PageDocument;
pub use embed::{scan_embedded_state, EmbeddedState};
pub use error::{ErrorKind, ScanError, ScraperError};
pub use platform::{MediaExtractor, Platform};
pub use redirect::{AllowlistResolution, RedirectResolver, ResolvedUrl};
pub use share_text::{extract_url, is_valid_url};
pub use types::{ImageRef, NoteRecord};
