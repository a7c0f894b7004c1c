//! Constants shared across CDR products.

use stac_types::Provider;

/// Item property holding the record interval (`monthly`, `seasonal`,
/// `yearly`, or `pentadal`).
pub const INTERVAL_PROP: &str = "noaa_cdr:interval";

/// Item property holding the maximum depth of a depth-integrated product,
/// in meters.
pub const MAX_DEPTH_PROP: &str = "noaa_cdr:max_depth";

pub const EPSG_WGS84: i32 = 4326;

/// CDRs are distributed under NOAA's open data dissemination policy, which
/// STAC spells as a proprietary license with a link.
pub const LICENSE: &str = "proprietary";

/// Asset key for the source NetCDF file.
pub const NETCDF_ASSET_KEY: &str = "netcdf";

/// NCEI produces, processes, and hosts every CDR this crate handles.
pub fn providers() -> Vec<Provider> {
    vec![Provider {
        name: "National Centers for Environmental Information".to_string(),
        description: Some(
            "NCEI is the Nation's leading authority for environmental data, and manage \
             one of the largest archives of atmospheric, coastal, geophysical, and \
             oceanic research in the world."
                .to_string(),
        ),
        roles: ["producer", "processor", "licensor", "host"]
            .iter()
            .map(|r| r.to_string())
            .collect(),
        url: Some("https://www.ncei.noaa.gov/".to_string()),
    }]
}
