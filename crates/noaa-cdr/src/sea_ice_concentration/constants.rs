//! Sea ice concentration product constants.

use cdr_common::BoundingBox;

pub const ID: &str = "noaa-cdr-sea-ice-concentration";

pub const TITLE: &str = "Sea Ice Concentration CDR";

pub const DESCRIPTION: &str = "The Sea Ice Concentration Climate Data Record (CDR) provides \
a consistent daily and monthly time series of sea ice concentrations for both the north and \
south polar regions on a 25 km x 25 km grid. These data can be used to estimate how much of \
the ocean surface is covered by ice, and they are designed to promote monitoring of sea ice \
extent and area. The CDR combines concentration estimates from two algorithms developed at \
the NASA Goddard Space Flight Center and processes gridded brightness temperatures acquired \
from Defense Meteorological Satellite Program passive microwave radiometers.";

pub const DOI: &str = "10.7265/efmz-2t65";

pub const CITATION: &str = "Meier, W. N., F. Fetterer, A. K. Windnagel, and J. S. Stewart. \
2021. NOAA/NSIDC Climate Data Record of Passive Microwave Sea Ice Concentration, Version 4. \
Boulder, Colorado USA. NSIDC: National Snow and Ice Data Center. \
https://doi.org/10.7265/efmz-2t65.";

/// EPSG code of the NSIDC north polar stereographic grid.
pub const EPSG: i32 = 3411;

/// Grid cell size in meters.
pub const SPATIAL_RESOLUTION: f64 = 25_000.0;

/// Geographic coverage of the northern hemisphere grid.
pub const BBOX: BoundingBox = BoundingBox {
    min_x: -180.0,
    min_y: 31.1,
    max_x: 180.0,
    max_y: 90.0,
};

/// First day of the passive microwave record.
pub const EXTENT_START: (i32, u32, u32) = (1978, 10, 25);
