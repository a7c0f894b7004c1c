//! Synthesized CDR NetCDF fixtures.

use std::path::Path;

/// Write an ocean-heat-content-shaped NetCDF: a (time, lat, lon) anomaly
/// grid on a coarse global grid, with ACDD coverage attributes. The time
/// variable uses non-CF `months since` units, like the real files.
pub fn write_ocean_heat_content(
    path: &Path,
    variable: &str,
    n_times: usize,
    resolution: &str,
    with_units: bool,
) {
    let mut file = netcdf::create(path).unwrap();

    file.add_attribute("title", "Ocean Heat Content anomalies")
        .unwrap();
    file.add_attribute("summary", "Synthesized ocean heat content test data")
        .unwrap();
    file.add_attribute("time_coverage_start", "1955-01-01").unwrap();
    file.add_attribute(
        "time_coverage_duration",
        format!("P{}Y", n_times.max(1)).as_str(),
    )
    .unwrap();
    file.add_attribute("time_coverage_resolution", resolution)
        .unwrap();

    file.add_dimension("time", n_times).unwrap();
    file.add_dimension("lat", 4).unwrap();
    file.add_dimension("lon", 8).unwrap();

    let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
    time.put_attribute("units", "months since 1955-01-01 00:00:00")
        .unwrap();
    let months: Vec<f64> = (0..n_times).map(|i| (i * 12) as f64 + 6.0).collect();
    time.put_values(&months, ..).unwrap();

    let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
    lat.put_attribute("units", "degrees_north").unwrap();
    lat.put_values(&[67.5, 22.5, -22.5, -67.5], ..).unwrap();

    let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
    lon.put_attribute("units", "degrees_east").unwrap();
    lon.put_values(&[-157.5, -112.5, -67.5, -22.5, 22.5, 67.5, 112.5, 157.5], ..)
        .unwrap();

    let mut anomaly = file
        .add_variable::<f32>(variable, &["time", "lat", "lon"])
        .unwrap();
    anomaly
        .put_attribute("long_name", "heat content anomaly")
        .unwrap();
    if with_units {
        anomaly.put_attribute("units", "10^18_joules").unwrap();
    }
    anomaly.put_attribute("_FillValue", -9999.0f32).unwrap();
    let values: Vec<f32> = (0..n_times * 4 * 8)
        .map(|i| if i == 0 { -9999.0 } else { i as f32 })
        .collect();
    anomaly.put_values(&values, ..).unwrap();
}

/// Write a sea-ice-shaped NetCDF: one monthly period on a small projected
/// grid, with the dataset DOI in the `id` attribute and two gridded
/// variables.
pub fn write_sea_ice(path: &Path) {
    let mut file = netcdf::create(path).unwrap();

    file.add_attribute("id", "10.7265/efmz-2t65").unwrap();
    file.add_attribute("title", "NOAA/NSIDC Sea Ice Concentration CDR")
        .unwrap();
    file.add_attribute("summary", "Synthesized sea ice test data")
        .unwrap();
    file.add_attribute("time_coverage_start", "2023-12-01").unwrap();
    file.add_attribute("time_coverage_end", "2023-12-31T23:59:59")
        .unwrap();
    file.add_attribute("time_coverage_resolution", "P01M").unwrap();

    file.add_dimension("time", 1).unwrap();
    file.add_dimension("ygrid", 4).unwrap();
    file.add_dimension("xgrid", 5).unwrap();

    let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
    time.put_attribute("units", "days since 2023-12-01 00:00:00")
        .unwrap();
    time.put_values(&[14.5], ..).unwrap();

    let mut ygrid = file.add_variable::<f64>("ygrid", &["ygrid"]).unwrap();
    ygrid.put_attribute("units", "meters").unwrap();
    ygrid
        .put_values(&[1_000_000.0, 975_000.0, 950_000.0, 925_000.0], ..)
        .unwrap();

    let mut xgrid = file.add_variable::<f64>("xgrid", &["xgrid"]).unwrap();
    xgrid.put_attribute("units", "meters").unwrap();
    xgrid
        .put_values(&[-100_000.0, -75_000.0, -50_000.0, -25_000.0, 0.0], ..)
        .unwrap();

    let mut conc = file
        .add_variable::<f32>("cdr_seaice_conc", &["time", "ygrid", "xgrid"])
        .unwrap();
    conc.put_attribute(
        "long_name",
        "NOAA/NSIDC CDR of Passive Microwave Sea Ice Concentration",
    )
    .unwrap();
    conc.put_attribute("_FillValue", -1.0f32).unwrap();
    let values: Vec<f32> = (0..20)
        .map(|i| if i == 0 { -1.0 } else { i as f32 * 0.05 })
        .collect();
    conc.put_values(&values, ..).unwrap();

    let mut bootstrap = file
        .add_variable::<f32>("nsidc_bt_seaice_conc", &["time", "ygrid", "xgrid"])
        .unwrap();
    bootstrap
        .put_attribute("long_name", "Bootstrap sea ice concentration")
        .unwrap();
    let values: Vec<f32> = (0..20).map(|i| i as f32 * 0.04).collect();
    bootstrap.put_values(&values, ..).unwrap();
}
