//! Raster extension: per-band descriptions on assets.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{Asset, ItemAsset};

pub const SCHEMA_URI: &str = "https://stac-extensions.github.io/raster/v1.1.0/schema.json";

const BANDS_KEY: &str = "raster:bands";

/// Description of one raster band.
///
/// `nodata` is a JSON value because the fill can be the string `"nan"` for
/// floating-point grids as well as a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RasterBand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodata: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial_resolution: Option<f64>,
}

impl RasterBand {
    /// A NaN nodata marker, serialized as the string `"nan"`.
    pub fn nan_nodata() -> Value {
        json!("nan")
    }
}

/// Attach raster bands to an asset.
pub fn apply(asset: &mut Asset, bands: &[RasterBand]) {
    asset.set_extra(BANDS_KEY, json!(bands));
}

/// Attach raster bands to a collection `item_assets` entry.
pub fn apply_item_asset(item_asset: &mut ItemAsset, bands: &[RasterBand]) {
    item_asset
        .extra_fields
        .insert(BANDS_KEY.to_string(), json!(bands));
}

/// Read raster bands back off an asset.
pub fn bands(asset: &Asset) -> Option<Vec<RasterBand>> {
    let value = asset.extra_fields.get(BANDS_KEY)?;
    serde_json::from_value(value.clone()).ok()
}
