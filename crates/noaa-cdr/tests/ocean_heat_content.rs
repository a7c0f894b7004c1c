//! Ocean heat content STAC generation against synthesized NetCDF files.

mod common;

use std::fs;
use std::path::Path;

use chrono::{Datelike, Timelike};
use noaa_cdr::constants::{INTERVAL_PROP, MAX_DEPTH_PROP};
use noaa_cdr::ocean_heat_content::{self, CreateItemsOptions};
use noaa_cdr::{CreateItemOptions, Error};
use serde_json::json;
use stac_types::extensions::raster;

fn tif_files(dir: &Path) -> Vec<std::path::PathBuf> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "tif"))
        .collect()
}

#[test]
fn test_create_items_one_netcdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heat_content_anomaly_0-2000_yearly.nc");
    common::write_ocean_heat_content(&path, "h18_hc", 3, "P01Y", true);
    let cog_dir = dir.path().join("cogs");
    fs::create_dir(&cog_dir).unwrap();

    let hrefs = vec![path.to_str().unwrap().to_string()];
    let items =
        ocean_heat_content::create_items(&hrefs, &cog_dir, &CreateItemsOptions::default())
            .unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].id, "ocean-heat-content-yearly-2000m-1955");

    for item in &items {
        assert_eq!(item.assets.len(), 1);
        assert!(item.properties.datetime.is_none());

        let start = item.properties.start_datetime.unwrap();
        let end = item.properties.end_datetime.unwrap();
        assert_eq!((start.month(), start.day()), (1, 1));
        assert_eq!((end.month(), end.day()), (12, 31));
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(start.year(), end.year());

        assert_eq!(item.property(INTERVAL_PROP), Some(&json!("yearly")));
        assert_eq!(item.property(MAX_DEPTH_PROP), Some(&json!(2000)));
        assert_eq!(item.property("proj:epsg"), Some(&json!(4326)));
        assert_eq!(item.property("proj:shape"), Some(&json!([4, 8])));
        assert_eq!(
            item.property("proj:transform"),
            Some(&json!([45.0, 0.0, -180.0, 0.0, -45.0, 90.0]))
        );

        for asset in item.assets.values() {
            let bands = raster::bands(asset).unwrap();
            assert_eq!(bands.len(), 1);
            assert_eq!(bands[0].nodata, Some(json!("nan")));
            assert_eq!(bands[0].data_type.as_deref(), Some("float32"));
            assert_eq!(bands[0].unit.as_deref(), Some("10^18 joules"));
        }
        item.validate().unwrap();
    }

    assert_eq!(tif_files(&cog_dir).len(), 3);
}

#[test]
fn test_create_items_reuses_cog_hrefs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heat_content_anomaly_0-2000_yearly.nc");
    common::write_ocean_heat_content(&path, "h18_hc", 3, "P01Y", true);
    let cog_dir = dir.path().join("cogs");
    fs::create_dir(&cog_dir).unwrap();

    let hrefs = vec![path.to_str().unwrap().to_string()];
    let items =
        ocean_heat_content::create_items(&hrefs, &cog_dir, &CreateItemsOptions::default())
            .unwrap();

    let subdirectory = cog_dir.join("subdirectory");
    fs::create_dir(&subdirectory).unwrap();
    let mut cog_hrefs = Vec::new();
    for tif in tif_files(&cog_dir) {
        let target = subdirectory.join(tif.file_name().unwrap());
        fs::rename(&tif, &target).unwrap();
        cog_hrefs.push(target.to_str().unwrap().to_string());
    }

    let options = CreateItemsOptions {
        cog_hrefs,
        ..Default::default()
    };
    let new_items = ocean_heat_content::create_items(&hrefs, &cog_dir, &options).unwrap();
    assert_eq!(new_items.len(), items.len());
    assert!(tif_files(&cog_dir).is_empty());
    for item in &new_items {
        for asset in item.assets.values() {
            assert!(asset.href.contains("subdirectory"));
        }
    }
}

#[test]
fn test_create_items_two_netcdfs_same_items() {
    let dir = tempfile::tempdir().unwrap();
    let heat = dir.path().join("heat_content_anomaly_0-2000_yearly.nc");
    common::write_ocean_heat_content(&heat, "h18_hc", 3, "P01Y", true);
    let salinity = dir.path().join("mean_salinity_anomaly_0-2000_yearly.nc");
    common::write_ocean_heat_content(&salinity, "s_an", 3, "P01Y", false);
    let cog_dir = dir.path().join("cogs");
    fs::create_dir(&cog_dir).unwrap();

    let hrefs = vec![
        heat.to_str().unwrap().to_string(),
        salinity.to_str().unwrap().to_string(),
    ];
    let items =
        ocean_heat_content::create_items(&hrefs, &cog_dir, &CreateItemsOptions::default())
            .unwrap();
    assert_eq!(items.len(), 3);
    for item in &items {
        assert_eq!(item.assets.len(), 2);
        item.validate().unwrap();

        // The salinity variable is unitless, so its band has no unit key.
        let bands = raster::bands(&item.assets["s_an"]).unwrap();
        assert!(bands[0].unit.is_none());
        let bands = raster::bands(&item.assets["h18_hc"]).unwrap();
        assert!(bands[0].unit.is_some());
    }
}

#[test]
fn test_create_items_different_intervals_make_different_items() {
    let dir = tempfile::tempdir().unwrap();
    let yearly = dir.path().join("heat_content_anomaly_0-2000_yearly.nc");
    common::write_ocean_heat_content(&yearly, "h18_hc", 3, "P01Y", true);
    let pentad = dir.path().join("heat_content_anomaly_0-2000_pentad.nc");
    common::write_ocean_heat_content(&pentad, "h18_hc", 3, "P05Y", true);
    let cog_dir = dir.path().join("cogs");
    fs::create_dir(&cog_dir).unwrap();

    let hrefs = vec![
        yearly.to_str().unwrap().to_string(),
        pentad.to_str().unwrap().to_string(),
    ];
    let items =
        ocean_heat_content::create_items(&hrefs, &cog_dir, &CreateItemsOptions::default())
            .unwrap();
    assert_eq!(items.len(), 6);
    for item in &items {
        assert_eq!(item.assets.len(), 1);
    }
}

#[test]
fn test_create_items_latest_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heat_content_anomaly_0-2000_yearly.nc");
    common::write_ocean_heat_content(&path, "h18_hc", 3, "P01Y", true);
    let cog_dir = dir.path().join("cogs");
    fs::create_dir(&cog_dir).unwrap();

    let options = CreateItemsOptions {
        latest_only: true,
        ..Default::default()
    };
    let hrefs = vec![path.to_str().unwrap().to_string()];
    let items = ocean_heat_content::create_items(&hrefs, &cog_dir, &options).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "ocean-heat-content-yearly-2000m-1957");
}

#[test]
fn test_pentadal_windows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heat_content_anomaly_0-700_pentad.nc");
    common::write_ocean_heat_content(&path, "h18_hc", 3, "P05Y", true);
    let cog_dir = dir.path().join("cogs");
    fs::create_dir(&cog_dir).unwrap();

    let cogs = ocean_heat_content::cogify(
        path.to_str().unwrap(),
        Some(cog_dir.as_path()),
        &[],
        None,
    )
    .unwrap();
    assert_eq!(cogs.len(), 3);

    // Five-year windows advance yearly and are named for their center year.
    assert_eq!(cogs[0].start_datetime.year(), 1955);
    assert_eq!(cogs[0].end_datetime.year(), 1959);
    assert_eq!(cogs[1].start_datetime.year(), 1956);
    assert!(cogs[0].href.ends_with("heat_content_anomaly_0-700_pentad_1957.tif"));
    assert_eq!(cogs[0].max_depth, 700);
}

#[test]
fn test_cogify_without_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heat_content_anomaly_0-2000_yearly.nc");
    common::write_ocean_heat_content(&path, "h18_hc", 3, "P01Y", true);

    let result = ocean_heat_content::cogify(path.to_str().unwrap(), None, &[], None);
    assert!(matches!(result, Err(Error::MissingOutputDirectory)));
}

#[test]
fn test_create_netcdf_item() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heat_content_anomaly_0-2000_yearly.nc");
    common::write_ocean_heat_content(&path, "h18_hc", 3, "P01Y", true);

    let options = CreateItemOptions {
        decode_times: false,
        ..Default::default()
    };
    let item = noaa_cdr::create_item(path.to_str().unwrap(), &options).unwrap();
    assert_eq!(item.id, "heat_content_anomaly_0-2000_yearly");

    let start = item.properties.start_datetime.unwrap();
    let end = item.properties.end_datetime.unwrap();
    assert_eq!((start.year(), start.month(), start.day()), (1955, 1, 1));
    // Coverage end comes from the P3Y duration attribute.
    assert_eq!(end.year(), 1958);
    assert_eq!(item.property(INTERVAL_PROP), Some(&json!("yearly")));
    assert!(item.assets.contains_key("netcdf"));
    assert_eq!(
        item.assets["netcdf"].media_type.as_deref(),
        Some("application/netcdf")
    );
    assert_eq!(item.assets["netcdf"].roles, vec!["data", "source"]);
    item.validate().unwrap();

    // The time variable has non-CF units, so decoding changes nothing.
    let decoded = noaa_cdr::create_item(
        path.to_str().unwrap(),
        &CreateItemOptions::default(),
    )
    .unwrap();
    assert_eq!(decoded.properties.start_datetime, Some(start));
    assert_eq!(decoded.properties.end_datetime, Some(end));
}
