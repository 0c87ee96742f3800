// schema.org JSON-LD documents, one per input URL

use imgschema_scanner::ImageRecord;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const IMAGE_OBJECT_TYPE: &str = "ImageObject";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub schema_type: String,
    pub url: String,
    pub image: Vec<ImageRecord>,
}

impl PageSchema {
    pub fn new(url: impl Into<String>, images: Vec<ImageRecord>) -> Self {
        Self {
            context: SCHEMA_CONTEXT.to_string(),
            schema_type: IMAGE_OBJECT_TYPE.to_string(),
            url: url.into(),
            image: images,
        }
    }

    pub fn empty(url: impl Into<String>) -> Self {
        Self::new(url, Vec::new())
    }

    /// Compact JSON, keys in fixed order.
    pub fn to_json_ld(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json_ld(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One line of the exported CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub url: String,
    pub img_schema: String,
}

impl ResultRow {
    pub fn from_schema(schema: &PageSchema) -> Result<Self, serde_json::Error> {
        Ok(Self {
            url: schema.url.clone(),
            img_schema: schema.to_json_ld()?,
        })
    }
}
