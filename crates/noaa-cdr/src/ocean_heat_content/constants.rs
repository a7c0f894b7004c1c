//! Ocean heat content product constants.

use cdr_common::TimeInterval;

pub const ID: &str = "noaa-cdr-ocean-heat-content";

pub const TITLE: &str = "Global Ocean Heat Content CDR";

pub const DESCRIPTION: &str = "The Ocean Heat Content Climate Data Record (CDR) is a set \
of ocean heat content anomaly (OHCA) time series for 1955-present on 3-month, yearly, and \
pentadal (five-yearly) scales. This CDR quantifies ocean heat content change over time, \
which is an essential metric for understanding climate change and the Earth's energy budget. \
It provides time series for multiple depth ranges in the global ocean and each of the major \
basins (Atlantic, Pacific, and Indian) divided by hemisphere (Northern, Southern).";

pub const DOI: &str = "10.7289/v53f4mvp";

pub const CITATION: &str = "Levitus, Sydney; Antonov, John I.; Boyer, Tim P.; Baranova, \
Olga K.; Garcia, Hernan E.; Locarnini, Ricardo A.; Mishonov, Alexey V.; Reagan, James R.; \
Seidov, Dan; Yarosh, Evgeney; Zweng, Melissa M. (2017). NCEI ocean heat content, temperature \
anomalies, salinity anomalies, thermosteric sea level anomalies, halosteric sea level \
anomalies, and total steric sea level anomalies from 1955 to present calculated from in situ \
oceanographic subsurface profile data (NCEI Accession 0164586). NOAA National Centers for \
Environmental Information. Dataset. https://doi.org/10.7289/v53f4mvp.";

/// Root of NCEI's archive directory for the derived products.
pub const BASE_HREF: &str =
    "https://www.ncei.noaa.gov/data/oceans/ncei/archive/data/0164586/derived";

/// First year with records.
pub const EXTENT_START_YEAR: i32 = 1955;

/// Depth layers, as the `{top}-{bottom}` token used in file names.
pub const DEPTHS: &[&str] = &["0-700", "0-2000"];

const ALL_INTERVALS: &[TimeInterval] = &[
    TimeInterval::Monthly,
    TimeInterval::Seasonal,
    TimeInterval::Yearly,
    TimeInterval::Pentadal,
];

const LONG_INTERVALS: &[TimeInterval] = &[TimeInterval::Yearly, TimeInterval::Pentadal];

/// Source NetCDF variables and the intervals each is published at. Only the
/// heat content anomaly is produced monthly and seasonally.
///
/// NCEI's archive holds more files than this table produces; the collection
/// catalogs only the global products for the two depth layers above, not the
/// per-basin and per-hemisphere series.
pub const VARIABLES: &[(&str, &[TimeInterval])] = &[
    ("heat_content_anomaly", ALL_INTERVALS),
    ("mean_halosteric_sea_level_anomaly", LONG_INTERVALS),
    ("mean_salinity_anomaly", LONG_INTERVALS),
    ("mean_temperature_anomaly", LONG_INTERVALS),
    ("mean_thermosteric_sea_level_anomaly", LONG_INTERVALS),
    ("mean_total_steric_sea_level_anomaly", LONG_INTERVALS),
];
