use serde::{Deserialize, Serialize};

/// One `<img>` element that survived extraction, in schema.org ImageObject shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(rename = "@type")]
    pub schema_type: String,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "contentUrl")]
    pub content_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<String>,
}

impl ImageRecord {
    pub fn new(content_url: String) -> Self {
        Self {
            schema_type: "ImageObject".to_string(),
            name: None,
            description: None,
            content_url,
            height: None,
            width: None,
        }
    }

    /// Alt text doubles as both name and description.
    pub fn with_alt(mut self, alt: Option<String>) -> Self {
        self.name = alt.clone();
        self.description = alt;
        self
    }

    pub fn with_dimensions(mut self, height: Option<String>, width: Option<String>) -> Self {
        self.height = height;
        self.width = width;
        self
    }
}
