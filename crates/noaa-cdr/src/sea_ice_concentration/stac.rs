//! STAC metadata for the sea ice concentration CDR.

use chrono::{TimeZone, Utc};
use serde_json::json;
use stac_types::extensions::raster::{self, RasterBand};
use stac_types::extensions::scientific;
use stac_types::{media_type, Collection, Extent, Item, ItemAsset};

use netcdf_reader::Dataset;

use crate::constants::{providers, INTERVAL_PROP, LICENSE};
use crate::error::Result;
use crate::sea_ice_concentration::constants::{
    BBOX, CITATION, DESCRIPTION, DOI, EXTENT_START, ID, SPATIAL_RESOLUTION, TITLE,
};
use crate::sea_ice_concentration::grid_projection;
use crate::stac::{file_stem, CreateItemOptions};

/// Create an item for one sea ice concentration NetCDF file.
///
/// The file's `id` attribute holds the dataset DOI, which is the same for
/// every file, so the item id always comes from the file name instead.
pub fn create_item(href: &str, options: &CreateItemOptions) -> Result<Item> {
    let dataset = Dataset::open(href, options.read_href_modifier)?;
    let (_, projection) = grid_projection(&dataset)?;
    let id = match &options.id {
        Some(id) => id.clone(),
        None => file_stem(href)?.to_string(),
    };
    let options = CreateItemOptions {
        id: Some(id),
        decode_times: options.decode_times,
        read_href_modifier: options.read_href_modifier,
        bbox: Some(BBOX),
        projection: Some(projection),
    };
    crate::stac::create_item_from_dataset(&dataset, &options)
}

/// Create the sea ice concentration collection.
pub fn create_collection() -> Collection {
    let (year, month, day) = EXTENT_START;
    let extent = Extent::new(
        BBOX.to_vec(),
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single(),
        None,
    );
    let mut collection = Collection::new(ID, DESCRIPTION, extent);
    collection.title = Some(TITLE.to_string());
    collection.license = LICENSE.to_string();
    collection.providers = providers();
    scientific::apply(&mut collection, DOI, CITATION);
    collection.add_extension(raster::SCHEMA_URI);

    collection.item_assets.insert(
        "netcdf".to_string(),
        ItemAsset {
            title: Some("NetCDF file".to_string()),
            media_type: Some(media_type::NETCDF.to_string()),
            roles: vec!["data".to_string(), "source".to_string()],
            ..Default::default()
        },
    );
    let mut concentration = ItemAsset {
        title: Some("Sea ice concentration fraction".to_string()),
        media_type: Some(media_type::COG.to_string()),
        roles: vec!["data".to_string()],
        ..Default::default()
    };
    raster::apply_item_asset(
        &mut concentration,
        &[RasterBand {
            nodata: Some(RasterBand::nan_nodata()),
            data_type: Some("float32".to_string()),
            unit: None,
            spatial_resolution: Some(SPATIAL_RESOLUTION),
        }],
    );
    collection
        .item_assets
        .insert("cdr_seaice_conc".to_string(), concentration);

    collection.set_summary(INTERVAL_PROP, json!(["monthly"]));
    collection
}
