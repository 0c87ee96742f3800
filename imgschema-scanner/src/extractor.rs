use crate::error::{Result, ScanError};
use crate::result::ImageRecord;
use html5ever::driver::{self, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{ElementRef, Html, HtmlTreeSink, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Byline prefix some templates put in front of the real alt text.
pub const DEFAULT_ALT_PREFIX: &str = "Writer: ";

/// Blurred lazy-load placeholders and proxied thumbnails.
pub const DEFAULT_DENY_SUBSTRINGS: &[&str] = &["blurred", "googleusercontent.com"];

/// Declarative rules applied while walking a page's images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRules {
    /// CSS selector for the content sub-tree; the first match wins.
    /// When the match is itself an `<img>`, that image is the only candidate.
    pub scope: Option<String>,
    /// Case-sensitive substrings that disqualify an image `src`.
    pub deny_substrings: Vec<String>,
    /// Stripped once from the start of the alt text.
    pub alt_prefix: Option<String>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            scope: None,
            deny_substrings: DEFAULT_DENY_SUBSTRINGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            alt_prefix: Some(DEFAULT_ALT_PREFIX.to_string()),
        }
    }
}

impl ExtractionRules {
    /// Every `<img>` with a `src`, alt text untouched.
    pub fn permissive() -> Self {
        Self {
            scope: None,
            deny_substrings: Vec::new(),
            alt_prefix: None,
        }
    }
}

pub struct ImageExtractor {
    rules: ExtractionRules,
    scope: Option<Selector>,
    img: Selector,
}

impl ImageExtractor {
    pub fn new(rules: ExtractionRules) -> Result<Self> {
        let scope = rules.scope.as_deref().map(parse_selector).transpose()?;
        let img = parse_selector("img")?;
        Ok(Self { rules, scope, img })
    }

    /// Walk the page (or its scoped sub-tree) and return the surviving
    /// images in document order.
    pub fn extract(&self, html: &str) -> Vec<ImageRecord> {
        let document = parse_page(html);

        let root = match &self.scope {
            Some(selector) => match document.select(selector).next() {
                Some(element) => element,
                None => {
                    debug!(
                        "Scope {:?} not found, page yields no images",
                        self.rules.scope
                    );
                    return Vec::new();
                }
            },
            None => document.root_element(),
        };

        if root.value().name() == "img" {
            return self.to_record(root).into_iter().collect();
        }

        root.select(&self.img)
            .filter_map(|element| self.to_record(element))
            .collect()
    }

    fn to_record(&self, element: ElementRef<'_>) -> Option<ImageRecord> {
        let attrs = element.value();
        let src = attrs.attr("src")?;

        if let Some(marker) = self.denied_by(src) {
            debug!("Skipping {} (matches '{}')", src, marker);
            return None;
        }

        let alt = attrs.attr("alt").map(|alt| self.clean_alt(alt));
        let record = ImageRecord::new(src.to_string())
            .with_alt(alt)
            .with_dimensions(
                attrs.attr("height").map(str::to_string),
                attrs.attr("width").map(str::to_string),
            );

        Some(record)
    }

    fn denied_by(&self, src: &str) -> Option<&str> {
        self.rules
            .deny_substrings
            .iter()
            .find(|marker| !marker.is_empty() && src.contains(marker.as_str()))
            .map(String::as_str)
    }

    pub fn clean_alt(&self, alt: &str) -> String {
        match self.rules.alt_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => {
                alt.strip_prefix(prefix).unwrap_or(alt).to_string()
            }
            _ => alt.to_string(),
        }
    }
}

/// Parse with scripting off so `<noscript>` content is a real sub-tree.
/// Lazy-loading templates keep the full-size `<img>` there.
fn parse_page(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScanError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}
