//! STAC asset objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A file associated with an Item or Collection.
///
/// Extension fields (`raster:bands`, ...) live in `extra_fields` and are
/// flattened into the asset object on serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub roles: Vec<String>,
    #[serde(flatten)]
    pub extra_fields: Map<String, Value>,
}

impl Asset {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
            description: None,
            media_type: None,
            roles: Vec::new(),
            extra_fields: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) {
        self.extra_fields.insert(key.into(), value);
    }
}
