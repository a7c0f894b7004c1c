//! The NOAA/NSIDC Sea Ice Concentration CDR.
//!
//! Passive microwave concentration grids on the NSIDC polar stereographic
//! projection, one NetCDF file per period with several gridded variables
//! (the CDR concentration plus ancillary fields). Items carry one COG asset
//! per variable.

pub mod cog;
pub mod constants;
pub mod stac;

pub use cog::cogify;
pub use stac::{create_collection, create_item};

use cdr_common::BoundingBox;
use netcdf_reader::{Dataset, NetCdfError};
use stac_types::extensions::projection::Projection;

use crate::error::Result;

/// Projected bounds and projection fields from the `xgrid`/`ygrid`
/// coordinate variables, which hold cell-center positions in meters.
pub(crate) fn grid_projection(dataset: &Dataset) -> Result<(BoundingBox, Projection)> {
    let x = dataset.coord_values("xgrid")?;
    let y = dataset.coord_values("ygrid")?;
    if x.len() < 2 || y.len() < 2 {
        return Err(
            NetCdfError::InvalidFormat("Degenerate projected coordinate grid".to_string()).into(),
        );
    }

    let x_res = (x[1] - x[0]).abs();
    let y_res = (y[1] - y[0]).abs();
    let x_min = x.iter().cloned().fold(f64::INFINITY, f64::min);
    let x_max = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let y_min = y.iter().cloned().fold(f64::INFINITY, f64::min);
    let y_max = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let bounds = BoundingBox::new(
        x_min - x_res / 2.0,
        y_min - y_res / 2.0,
        x_max + x_res / 2.0,
        y_max + y_res / 2.0,
    );
    let projection = Projection {
        epsg: constants::EPSG,
        shape: vec![y.len(), x.len()],
        transform: vec![x_res, 0.0, bounds.min_x, 0.0, -y_res, bounds.max_y],
    };
    Ok((bounds, projection))
}
