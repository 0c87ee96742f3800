pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod result;

pub use error::ScanError;
pub use extractor::{ExtractionRules, ImageExtractor};
pub use fetcher::{FetchOptions, PageFetcher};
pub use result::ImageRecord;
