//! Page fetcher port
//!
//! Defines the interface for retrieving web content.

/// How a page should be returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Readable text with markup removed (used by the pipeline)
    #[default]
    Text,
    /// The raw response body
    Html,
}

impl std::fmt::Display for FetchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Fetches web pages
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url`
    ///
    /// Retry and timeout policy belong to the implementation; the pipeline
    /// propagates any error as-is.
    fn fetch(&self, url: &str, mode: FetchMode) -> anyhow::Result<String>;
}
