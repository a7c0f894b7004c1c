//! STAC Item records.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use cdr_common::BoundingBox;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Asset, Link, StacError, STAC_VERSION};

/// Item properties.
///
/// `datetime` is always serialized, as null when the item is described by a
/// start/end range instead of an instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    pub datetime: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_datetime: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_datetime: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra_fields: Map<String, Value>,
}

/// A single spatio-temporal metadata record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub type_: String,
    pub stac_version: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub stac_extensions: Vec<String>,
    pub id: String,
    pub geometry: Value,
    pub bbox: Vec<f64>,
    pub properties: Properties,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub assets: BTreeMap<String, Asset>,
}

impl Item {
    /// Create an item covering the given bounding box, with no datetime set.
    pub fn new(id: impl Into<String>, bbox: &BoundingBox) -> Self {
        Self {
            type_: "Feature".to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: Vec::new(),
            id: id.into(),
            geometry: bbox.polygon(),
            bbox: bbox.to_vec(),
            properties: Properties::default(),
            links: Vec::new(),
            assets: BTreeMap::new(),
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

    pub fn set_property(&mut self, key: impl Into<String>, value: Value) {
        self.properties.extra_fields.insert(key.into(), value);
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.extra_fields.get(key)
    }

    /// Check the STAC invariants this model can violate.
    pub fn validate(&self) -> Result<(), StacError> {
        if self.id.is_empty() {
            return Err(StacError::EmptyId(self.id.clone()));
        }
        if self.bbox.len() != 4 && self.bbox.len() != 6 {
            return Err(StacError::InvalidBbox {
                id: self.id.clone(),
                len: self.bbox.len(),
            });
        }
        let p = &self.properties;
        if p.datetime.is_none() && (p.start_datetime.is_none() || p.end_datetime.is_none()) {
            return Err(StacError::MissingDatetime(self.id.clone()));
        }
        Ok(())
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), StacError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> Result<Self, StacError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
