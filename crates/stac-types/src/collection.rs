//! STAC Collection records.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Asset, Link, StacError, STAC_VERSION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialExtent {
    pub bbox: Vec<Vec<f64>>,
}

/// Temporal extent; open ends are null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalExtent {
    pub interval: Vec<Vec<Option<DateTime<Utc>>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extent {
    pub spatial: SpatialExtent,
    pub temporal: TemporalExtent,
}

impl Extent {
    pub fn new(bbox: Vec<f64>, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self {
            spatial: SpatialExtent { bbox: vec![bbox] },
            temporal: TemporalExtent {
                interval: vec![vec![start, end]],
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An `item_assets` entry: describes the assets that items in this collection
/// will carry, without binding to a concrete href.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemAsset {
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

/// A grouping of related Items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    #[serde(rename = "type")]
    pub type_: String,
    pub stac_version: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub stac_extensions: Vec<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    pub license: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub providers: Vec<Provider>,
    pub extent: Extent,
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub summaries: Map<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub assets: BTreeMap<String, Asset>,
    #[serde(
        rename = "item_assets",
        skip_serializing_if = "BTreeMap::is_empty",
        default
    )]
    pub item_assets: BTreeMap<String, ItemAsset>,
    #[serde(flatten)]
    pub extra_fields: Map<String, Value>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Collection {
    pub fn new(id: impl Into<String>, description: impl Into<String>, extent: Extent) -> Self {
        Self {
            type_: "Collection".to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: Vec::new(),
            id: id.into(),
            title: None,
            description: description.into(),
            license: "proprietary".to_string(),
            providers: Vec::new(),
            extent,
            summaries: Map::new(),
            assets: BTreeMap::new(),
            item_assets: BTreeMap::new(),
            extra_fields: Map::new(),
            links: Vec::new(),
        }
    }

    /// Declare an extension schema, at most once.
    pub fn add_extension(&mut self, uri: &str) {
        if !self.stac_extensions.iter().any(|u| u == uri) {
            self.stac_extensions.push(uri.to_string());
        }
    }

    pub fn add_asset(&mut self, key: impl Into<String>, asset: Asset) {
        self.assets.insert(key.into(), asset);
    }

    pub fn set_summary(&mut self, key: impl Into<String>, value: Value) {
        self.summaries.insert(key.into(), value);
    }

    pub fn validate(&self) -> Result<(), StacError> {
        if self.id.is_empty() {
            return Err(StacError::EmptyId(self.id.clone()));
        }
        for bbox in &self.extent.spatial.bbox {
            if bbox.len() != 4 && bbox.len() != 6 {
                return Err(StacError::InvalidBbox {
                    id: self.id.clone(),
                    len: bbox.len(),
                });
            }
        }
        Ok(())
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), StacError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
