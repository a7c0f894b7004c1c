//! Media type strings for catalog assets.

pub const NETCDF: &str = "application/netcdf";
pub const COG: &str = "image/tiff; application=geotiff; profile=cloud-optimized";
pub const GEOJSON: &str = "application/geo+json";
pub const JSON: &str = "application/json";
