use crate::error::{ExportError, GenerateError};
use crate::export::{CsvExport, ExportCache};
use crate::schema::{PageSchema, ResultRow};
use chrono::NaiveDate;
use imgschema_scanner::{ExtractionRules, FetchOptions, ImageExtractor, PageFetcher};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{info, warn};

/// Options for configuring a generation run
pub struct GenerateOptions {
    pub urls: Vec<String>,
    pub fetch: FetchOptions,
    pub rules: ExtractionRules,
    /// Stop at the first URL that cannot be fetched
    pub fail_fast: bool,
    pub show_progress_bars: bool,
}

impl GenerateOptions {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            fetch: FetchOptions::default(),
            rules: ExtractionRules::default(),
            fail_fast: false,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting generation progress
pub type GenerateProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// What happened to one input URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Extracted(PageSchema),
    Failed { url: String, reason: String },
}

impl PageOutcome {
    pub fn url(&self) -> &str {
        match self {
            PageOutcome::Extracted(schema) => &schema.url,
            PageOutcome::Failed { url, .. } => url,
        }
    }

    pub fn image_count(&self) -> usize {
        match self {
            PageOutcome::Extracted(schema) => schema.image.len(),
            PageOutcome::Failed { .. } => 0,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PageOutcome::Failed { .. })
    }

    /// Schema to export. A failed page still gets a row, with no images.
    pub fn schema(&self) -> PageSchema {
        match self {
            PageOutcome::Extracted(schema) => schema.clone(),
            PageOutcome::Failed { url, .. } => PageSchema::empty(url.clone()),
        }
    }
}

/// Result of one run, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    outcomes: Vec<PageOutcome>,
    rows: Vec<ResultRow>,
}

impl Generation {
    pub fn from_outcomes(outcomes: Vec<PageOutcome>) -> Result<Self, ExportError> {
        let rows = outcomes
            .iter()
            .map(|outcome| ResultRow::from_schema(&outcome.schema()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { outcomes, rows })
    }

    pub fn outcomes(&self) -> &[PageOutcome] {
        &self.outcomes
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn failures(&self) -> impl Iterator<Item = &PageOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn total_images(&self) -> usize {
        self.outcomes.iter().map(PageOutcome::image_count).sum()
    }

    pub fn export(&self, cache: &mut ExportCache, date: NaiveDate) -> Result<CsvExport, ExportError> {
        let bytes = cache.get_or_encode(&self.rows)?;
        Ok(CsvExport::new(date, bytes.to_vec()))
    }
}

/// Extract and wrap one page that is already in memory.
pub fn build_page_schema(url: &str, html: &str, extractor: &ImageExtractor) -> PageSchema {
    PageSchema::new(url, extractor.extract(html))
}

/// Log without tearing the progress bar.
fn with_bar_suspended<F: FnOnce()>(progress_bar: Option<&ProgressBar>, log: F) {
    match progress_bar {
        Some(pb) => pb.suspend(log),
        None => log(),
    }
}

/// Fetch every URL in order and build its schema.
/// Failed URLs are kept as `PageOutcome::Failed` unless `fail_fast` is set.
pub async fn execute_generation(
    options: GenerateOptions,
    progress_callback: Option<GenerateProgressCallback>,
) -> Result<Generation, GenerateError> {
    let GenerateOptions {
        urls,
        fetch,
        rules,
        fail_fast,
        show_progress_bars,
    } = options;

    let fetcher = PageFetcher::with_options(&fetch)?;
    let extractor = ImageExtractor::new(rules)?;

    info!("Generating image schemas for {} URL(s)", urls.len());

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(urls.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    let total = urls.len();
    let mut outcomes = Vec::with_capacity(total);

    for (idx, url) in urls.iter().enumerate() {
        if let Some(ref callback) = progress_callback {
            callback(format!("Fetching {}/{}: {}", idx + 1, total, url));
        }
        if let Some(ref pb) = progress_bar {
            pb.set_message(url.clone());
        }

        let outcome = match fetcher.fetch(url).await {
            Ok(html) => {
                let schema = build_page_schema(url, &html, &extractor);
                with_bar_suspended(progress_bar.as_ref(), || {
                    info!("{}: {} image(s)", url, schema.image.len())
                });
                PageOutcome::Extracted(schema)
            }
            Err(e) => {
                with_bar_suspended(progress_bar.as_ref(), || {
                    warn!("Failed to fetch {}: {}", url, e)
                });
                if fail_fast {
                    if let Some(ref pb) = progress_bar {
                        pb.abandon_with_message(format!("Aborted at {}", url));
                    }
                    return Err(GenerateError::Aborted {
                        url: url.clone(),
                        reason: e.to_string(),
                    });
                }
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  Failed to fetch {}: {}", url, e));
                }
                PageOutcome::Failed {
                    url: url.clone(),
                    reason: e.to_string(),
                }
            }
        };

        outcomes.push(outcome);
        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("Done! {} page(s) processed", total));
    }

    let generation = Generation::from_outcomes(outcomes)?;
    info!(
        "Generation complete: {} page(s), {} image(s), {} failure(s)",
        generation.outcomes().len(),
        generation.total_images(),
        generation.failures().count()
    );
    Ok(generation)
}
