//! Page fetching, text extraction, and content fingerprinting.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod fingerprint;

pub use error::ScraperError;
pub use extract::{extract_page, ExtractedPage};
pub use fetch::{FetchedPage, PageFetcher};
pub use fingerprint::fingerprint;
