//! Projection extension: grid georeferencing on items.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::Item;

pub const SCHEMA_URI: &str = "https://stac-extensions.github.io/projection/v1.1.0/schema.json";

/// Projection fields for a gridded dataset.
///
/// `transform` is the six-element affine transform in GDAL-style row order:
/// `[x_res, 0, west, 0, -y_res, north]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub epsg: i32,
    /// Grid shape as `[rows, columns]`.
    pub shape: Vec<usize>,
    pub transform: Vec<f64>,
}

/// Set the projection fields on an item and declare the extension.
pub fn apply(item: &mut Item, projection: &Projection) {
    item.set_property("proj:epsg", json!(projection.epsg));
    item.set_property("proj:shape", json!(projection.shape));
    item.set_property("proj:transform", json!(projection.transform));
    item.add_extension(SCHEMA_URI);
}

/// Read the projection fields back off an item.
pub fn of(item: &Item) -> Option<Projection> {
    Some(Projection {
        epsg: item.property("proj:epsg")?.as_i64()? as i32,
        shape: serde_json::from_value(item.property("proj:shape")?.clone()).ok()?,
        transform: serde_json::from_value(item.property("proj:transform")?.clone()).ok()?,
    })
}
