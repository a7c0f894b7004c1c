//! COG assets for sea ice concentration items.

use std::path::Path;

use cogify::{find_existing, CogWriter};
use netcdf_reader::{Dataset, ReadHrefModifier};
use stac_types::extensions::raster::{self, RasterBand};
use stac_types::{media_type, Asset, Item};
use tracing::{debug, info};

use crate::error::Result;
use crate::sea_ice_concentration::constants::SPATIAL_RESOLUTION;
use crate::sea_ice_concentration::grid_projection;
use crate::stac::file_stem;

/// Convert each gridded variable of the file to a COG and add the COGs as
/// item assets, keyed by variable name.
///
/// Sea ice files hold a single period, so only the first time slice exists.
/// COGs whose file name appears in `cog_hrefs` are reused instead of
/// rewritten.
pub fn cogify(
    item: &mut Item,
    href: &str,
    outdir: &Path,
    cog_hrefs: &[String],
    read_href_modifier: Option<&ReadHrefModifier>,
) -> Result<()> {
    let dataset = Dataset::open(href, read_href_modifier)?;
    let (bounds, projection) = grid_projection(&dataset)?;
    let stem = file_stem(href)?.to_string();

    let variables = dataset.data_variables();
    info!(
        href = %href,
        variables = variables.len(),
        "Converting sea ice variables to COGs"
    );

    for variable in variables {
        let file_name = format!("{}_{}.tif", stem, variable.name);
        let cog_href = if let Some(existing) = find_existing(cog_hrefs, &file_name) {
            debug!(href = %existing, "Reusing existing COG");
            existing.to_string()
        } else {
            let data = dataset.read_slice(&variable.name, 0)?;
            let path = outdir.join(&file_name);
            let mut writer = CogWriter::new(
                &data,
                projection.shape[1] as u32,
                projection.shape[0] as u32,
                bounds,
                projection.epsg as u16,
            );
            if variable.fill_value.is_none() {
                writer = writer.without_nodata();
            }
            writer.write(&path)?;
            path.to_string_lossy().into_owned()
        };

        let title = variable
            .long_name
            .clone()
            .unwrap_or_else(|| variable.name.replace('_', " "));
        let mut asset = Asset::new(cog_href)
            .with_title(title)
            .with_media_type(media_type::COG)
            .with_roles(&["data"]);
        raster::apply(
            &mut asset,
            &[RasterBand {
                nodata: variable.fill_value.map(|_| RasterBand::nan_nodata()),
                data_type: Some("float32".to_string()),
                unit: variable.display_units(),
                spatial_resolution: Some(SPATIAL_RESOLUTION),
            }],
        );
        item.add_asset(variable.name.clone(), asset);
    }

    item.add_extension(raster::SCHEMA_URI);
    Ok(())
}
