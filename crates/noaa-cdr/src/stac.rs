//! Generic NetCDF-to-Item mapping.
//!
//! Every CDR NetCDF carries ACDD global attributes (`id`, `title`, `summary`,
//! `time_coverage_*`); this module turns those into a STAC Item with the
//! source file as its single asset. Product modules build on it with their
//! own ids, georeferencing, and COG assets.

use std::path::Path;

use cdr_common::BoundingBox;
use netcdf_reader::{Dataset, NetCdfError, ReadHrefModifier};
use serde_json::json;
use stac_types::extensions::projection::{self, Projection};
use stac_types::{media_type, Asset, Item};
use tracing::debug;

use crate::constants::{EPSG_WGS84, INTERVAL_PROP, NETCDF_ASSET_KEY};
use crate::error::{Error, Result};

/// Options for generic item creation.
pub struct CreateItemOptions<'a> {
    /// Override for the item id. The default is the dataset's `id`
    /// attribute, falling back to the file stem.
    pub id: Option<String>,
    /// Decode the time variable against its CF epoch and widen the coverage
    /// window with the decoded values. CDR time units are often non-CF
    /// (`months since ...`); those cannot be decoded and the coverage
    /// attributes are used alone.
    pub decode_times: bool,
    /// Rewrites hrefs before remote fetches, e.g. to sign URLs.
    pub read_href_modifier: Option<&'a ReadHrefModifier>,
    /// Georeferencing override for grids without latitude/longitude
    /// coordinate variables.
    pub bbox: Option<BoundingBox>,
    pub projection: Option<Projection>,
}

impl Default for CreateItemOptions<'_> {
    fn default() -> Self {
        Self {
            id: None,
            decode_times: true,
            read_href_modifier: None,
            bbox: None,
            projection: None,
        }
    }
}

/// Create an item from any CDR NetCDF file using its global attributes.
pub fn create_item(href: &str, options: &CreateItemOptions) -> Result<Item> {
    let dataset = Dataset::open(href, options.read_href_modifier)?;
    create_item_from_dataset(&dataset, options)
}

pub(crate) fn create_item_from_dataset(
    dataset: &Dataset,
    options: &CreateItemOptions,
) -> Result<Item> {
    let id = match &options.id {
        Some(id) => id.clone(),
        None => match dataset.id() {
            Some(id) => id,
            None => file_stem(dataset.href())?.to_string(),
        },
    };

    let (bbox, projection) = match &options.bbox {
        Some(bbox) => (*bbox, options.projection.clone()),
        None => {
            let (bbox, projection) = grid_georeferencing(dataset)?;
            (bbox, Some(projection))
        }
    };

    let mut item = Item::new(id, &bbox);

    let mut start = dataset.time_coverage_start()?;
    let mut end = dataset.time_coverage_end()?;
    if options.decode_times {
        match dataset.decoded_times() {
            Ok(times) => {
                if let (Some(first), Some(last)) = (times.first(), times.last()) {
                    start = start.min(*first);
                    end = end.max(*last);
                }
            }
            Err(e) => {
                debug!(error = %e, href = %dataset.href(), "Using coverage attributes for time")
            }
        }
    }
    item.properties.start_datetime = Some(start);
    item.properties.end_datetime = Some(end);
    item.properties.title = dataset.title();
    item.properties.description = dataset.summary();

    if let Ok(interval) = dataset.time_interval() {
        item.set_property(INTERVAL_PROP, json!(interval.as_str()));
    }

    if let Some(projection) = &projection {
        projection::apply(&mut item, projection);
    }

    let mut asset = Asset::new(dataset.href())
        .with_media_type(media_type::NETCDF)
        .with_roles(&["data", "source"]);
    if let Some(title) = dataset.title() {
        asset = asset.with_title(title);
    }
    item.add_asset(NETCDF_ASSET_KEY, asset);

    item.validate()?;
    Ok(item)
}

/// Derive the bounding box and projection fields from a latitude/longitude
/// coordinate grid. Coordinates are cell centers, so the bounds extend half
/// a cell past the outermost coordinates.
pub(crate) fn grid_georeferencing(dataset: &Dataset) -> Result<(BoundingBox, Projection)> {
    let grid = dataset
        .geographic_grid()
        .ok_or_else(|| NetCdfError::MissingData("geographic coordinate grid".to_string()))?;
    let latitudes = &grid.latitudes;
    let longitudes = &grid.longitudes;
    if latitudes.len() < 2 || longitudes.len() < 2 {
        return Err(
            NetCdfError::InvalidFormat("Degenerate coordinate grid".to_string()).into(),
        );
    }

    let y_res = (latitudes[1] - latitudes[0]).abs();
    let x_res = (longitudes[1] - longitudes[0]).abs();
    let lat_min = latitudes.iter().cloned().fold(f64::INFINITY, f64::min);
    let lat_max = latitudes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lon_min = longitudes.iter().cloned().fold(f64::INFINITY, f64::min);
    let lon_max = longitudes.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let bbox = BoundingBox::new(
        lon_min - x_res / 2.0,
        lat_min - y_res / 2.0,
        lon_max + x_res / 2.0,
        lat_max + y_res / 2.0,
    );
    let projection = Projection {
        epsg: EPSG_WGS84,
        shape: vec![latitudes.len(), longitudes.len()],
        transform: vec![x_res, 0.0, bbox.min_x, 0.0, -y_res, bbox.max_y],
    };
    Ok((bbox, projection))
}

pub(crate) fn file_stem(href: &str) -> Result<&str> {
    Path::new(href)
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::HrefParse {
            field: "file stem",
            href: href.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(
            file_stem("https://example.com/data/heat_content_anomaly_0-2000_yearly.nc").unwrap(),
            "heat_content_anomaly_0-2000_yearly"
        );
        assert_eq!(file_stem("local/file.nc").unwrap(), "file");
    }
}
