//! NetCDF-to-COG conversion for ocean heat content files.

use std::path::Path;

use cdr_common::time::add_months;
use cdr_common::{BoundingBox, TimeInterval};
use chrono::{DateTime, Datelike, Utc};
use cogify::{find_existing, CogWriter};
use netcdf_reader::{Dataset, ReadHrefModifier, VariableMetadata};
use stac_types::extensions::projection::Projection;
use stac_types::extensions::raster::{self, RasterBand};
use stac_types::{media_type, Asset};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::ocean_heat_content::max_depth_from_href;
use crate::stac::{file_stem, grid_georeferencing};

/// One converted time slice, with the metadata needed to place it in an item.
#[derive(Debug, Clone)]
pub struct Cog {
    pub href: String,
    pub variable: VariableMetadata,
    pub interval: TimeInterval,
    pub max_depth: u32,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub bbox: BoundingBox,
    pub projection: Projection,
}

impl Cog {
    /// The STAC asset for this COG.
    ///
    /// Written slices are always float32 with fills mapped to NaN, whatever
    /// the source variable's storage type.
    pub fn asset(&self) -> Asset {
        let name = self
            .variable
            .long_name
            .clone()
            .unwrap_or_else(|| self.variable.name.replace('_', " "));
        let mut asset = Asset::new(&self.href)
            .with_title(format!("{} : {}", name, self.interval))
            .with_media_type(media_type::COG)
            .with_roles(&["data"]);
        raster::apply(
            &mut asset,
            &[RasterBand {
                nodata: Some(RasterBand::nan_nodata()),
                data_type: Some("float32".to_string()),
                unit: self.variable.display_units(),
                spatial_resolution: None,
            }],
        );
        asset
    }
}

/// Convert every time slice of an ocean heat content NetCDF to a COG.
///
/// Slices whose file name already appears in `cog_hrefs` are reused instead
/// of rewritten; `outdir` is only required when at least one slice has to be
/// written.
pub fn cogify(
    href: &str,
    outdir: Option<&Path>,
    cog_hrefs: &[String],
    read_href_modifier: Option<&ReadHrefModifier>,
) -> Result<Vec<Cog>> {
    let dataset = Dataset::open(href, read_href_modifier)?;
    let interval = dataset.time_interval()?;
    let max_depth = max_depth_from_href(href)?;
    let coverage_start = dataset.time_coverage_start()?;
    let variable = dataset.primary_data_variable()?;
    let (bbox, projection) = grid_georeferencing(&dataset)?;
    let stem = file_stem(href)?.to_string();

    let time_len = dataset.time_len();
    info!(
        href = %href,
        variable = %variable.name,
        slices = time_len,
        "Converting NetCDF time slices to COGs"
    );

    let mut cogs = Vec::with_capacity(time_len);
    for index in 0..time_len {
        // Pentadal records advance yearly but are centered on their
        // five-year window, so the first representative year is start + 2.
        let representative = match interval {
            TimeInterval::Pentadal => add_months(coverage_start, 24 + 12 * index as i32)?,
            _ => interval.advance(coverage_start, index)?,
        };
        let (start_datetime, end_datetime) = interval.datetime_interval(representative)?;

        let file_name = match interval {
            TimeInterval::Monthly | TimeInterval::Seasonal => format!(
                "{}_{}-{:02}.tif",
                stem,
                start_datetime.year(),
                start_datetime.month()
            ),
            _ => format!("{}_{}.tif", stem, representative.year()),
        };

        let cog_href = if let Some(existing) = find_existing(cog_hrefs, &file_name) {
            debug!(href = %existing, "Reusing existing COG");
            existing.to_string()
        } else {
            let outdir = outdir.ok_or(Error::MissingOutputDirectory)?;
            let data = dataset.read_slice(&variable.name, index)?;
            let path = outdir.join(&file_name);
            CogWriter::new(
                &data,
                projection.shape[1] as u32,
                projection.shape[0] as u32,
                bbox,
                projection.epsg as u16,
            )
            .write(&path)?;
            path.to_string_lossy().into_owned()
        };

        cogs.push(Cog {
            href: cog_href,
            variable: variable.clone(),
            interval,
            max_depth,
            start_datetime,
            end_datetime,
            bbox,
            projection: projection.clone(),
        });
    }
    Ok(cogs)
}
