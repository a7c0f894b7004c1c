//! Dataset access: global attributes, coordinates, and slice reads.

use chrono::{DateTime, Duration, Utc};
use netcdf::AttributeValue;
use tracing::debug;

use cdr_common::time::{parse_datetime, Iso8601Duration, TimeInterval};

use crate::error::{NetCdfError, NetCdfResult};
use crate::remote::{resolve, FileSource, ReadHrefModifier};
use crate::variable::VariableMetadata;

/// Latitude/longitude coordinate values of a geographic grid.
#[derive(Debug, Clone)]
pub struct GeographicGrid {
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
}

/// An open NetCDF dataset.
///
/// Holds the staged download (if any) alongside the open file so the backing
/// temp file outlives every read.
pub struct Dataset {
    file: netcdf::File,
    href: String,
    _source: FileSource,
}

impl Dataset {
    /// Open a local or remote dataset.
    pub fn open(href: &str, modifier: Option<&ReadHrefModifier>) -> NetCdfResult<Self> {
        let source = resolve(href, modifier)?;
        let file = netcdf::open(source.path()).map_err(|e| {
            NetCdfError::InvalidFormat(format!("Failed to open NetCDF {}: {}", href, e))
        })?;
        debug!(href = %href, "Opened NetCDF dataset");
        Ok(Self {
            file,
            href: href.to_string(),
            _source: source,
        })
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    // === Global attributes ===

    pub fn str_attr(&self, name: &str) -> Option<String> {
        if !self.file.attributes().any(|attr| attr.name() == name) {
            return None;
        }
        match self.file.attribute(name)?.value().ok()? {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn require_str_attr(&self, name: &str) -> NetCdfResult<String> {
        self.str_attr(name)
            .ok_or_else(|| NetCdfError::MissingData(format!("global attribute {}", name)))
    }

    pub fn id(&self) -> Option<String> {
        self.str_attr("id")
    }

    pub fn title(&self) -> Option<String> {
        self.str_attr("title")
    }

    pub fn summary(&self) -> Option<String> {
        self.str_attr("summary")
    }

    // === Temporal coverage ===

    pub fn time_coverage_start(&self) -> NetCdfResult<DateTime<Utc>> {
        let raw = self.require_str_attr("time_coverage_start")?;
        parse_datetime(&raw).map_err(|e| NetCdfError::InvalidFormat(e.to_string()))
    }

    /// Coverage end, falling back to start + `time_coverage_duration` when
    /// `time_coverage_end` is absent.
    pub fn time_coverage_end(&self) -> NetCdfResult<DateTime<Utc>> {
        if let Some(raw) = self.str_attr("time_coverage_end") {
            return parse_datetime(&raw).map_err(|e| NetCdfError::InvalidFormat(e.to_string()));
        }
        let duration = self.str_attr("time_coverage_duration").ok_or_else(|| {
            NetCdfError::MissingData(
                "global attribute time_coverage_end or time_coverage_duration".to_string(),
            )
        })?;
        let duration = Iso8601Duration::parse(&duration)
            .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))?;
        duration
            .add_to(self.time_coverage_start()?)
            .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))
    }

    /// The record interval, from `time_coverage_resolution` when present,
    /// otherwise from the file name.
    pub fn time_interval(&self) -> NetCdfResult<TimeInterval> {
        if let Some(resolution) = self.str_attr("time_coverage_resolution") {
            return TimeInterval::from_resolution(&resolution)
                .map_err(|e| NetCdfError::InvalidFormat(e.to_string()));
        }
        TimeInterval::from_href(&self.href).ok_or_else(|| {
            NetCdfError::MissingData(format!(
                "time interval (no time_coverage_resolution attribute, none in href {})",
                self.href
            ))
        })
    }

    // === Structure ===

    pub fn dimension_len(&self, name: &str) -> Option<usize> {
        self.file.dimension(name).map(|d| d.len())
    }

    /// Number of records along the time dimension (1 if there is none).
    pub fn time_len(&self) -> usize {
        self.dimension_len("time").unwrap_or(1)
    }

    pub fn coord_values(&self, name: &str) -> NetCdfResult<Vec<f64>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;
        var.get_values(..)
            .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))
    }

    /// The geographic coordinate grid, if the dataset has one.
    pub fn geographic_grid(&self) -> Option<GeographicGrid> {
        let lat_name = ["lat", "latitude"]
            .into_iter()
            .find(|n| self.file.variable(n).is_some())?;
        let lon_name = ["lon", "longitude"]
            .into_iter()
            .find(|n| self.file.variable(n).is_some())?;
        Some(GeographicGrid {
            latitudes: self.coord_values(lat_name).ok()?,
            longitudes: self.coord_values(lon_name).ok()?,
        })
    }

    pub fn variable_metadata(&self, name: &str) -> NetCdfResult<VariableMetadata> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;
        Ok(VariableMetadata::from_variable(&var))
    }

    /// Gridded data variables: at least two dimensions, excluding
    /// coordinates, bounds, and grid-mapping bookkeeping.
    pub fn data_variables(&self) -> Vec<VariableMetadata> {
        let dimension_names: Vec<String> =
            self.file.dimensions().map(|d| d.name()).collect();
        self.file
            .variables()
            .filter(|var| {
                let name = var.name();
                var.dimensions().len() >= 2
                    && !dimension_names.contains(&name)
                    && !name.contains("bnds")
                    && !name.contains("bounds")
                    && !name.to_lowercase().contains("crs")
            })
            .map(|var| VariableMetadata::from_variable(&var))
            .collect()
    }

    /// The first gridded data variable; CDR files carry exactly one.
    pub fn primary_data_variable(&self) -> NetCdfResult<VariableMetadata> {
        self.data_variables()
            .into_iter()
            .next()
            .ok_or_else(|| NetCdfError::MissingData("gridded data variable".to_string()))
    }

    // === Data reads ===

    /// Read one time slice of a variable as f32, with scale/offset applied
    /// and fill values mapped to NaN.
    pub fn read_slice(&self, name: &str, time_index: usize) -> NetCdfResult<Vec<f32>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;

        let ndim = var.dimensions().len();
        let raw: Vec<f32> = match ndim {
            2 => var.get_values(..),
            3 => var.get_values((time_index..time_index + 1, .., ..)),
            4 => var.get_values((time_index..time_index + 1, 0..1, .., ..)),
            n => {
                return Err(NetCdfError::InvalidFormat(format!(
                    "Unsupported rank {} for variable {}",
                    n, name
                )))
            }
        }
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))?;

        let scale_factor = crate::variable::f64_attr(&var, "scale_factor").unwrap_or(1.0) as f32;
        let add_offset = crate::variable::f64_attr(&var, "add_offset").unwrap_or(0.0) as f32;
        let fill_value = crate::variable::f64_attr(&var, "_FillValue")
            .or_else(|| crate::variable::f64_attr(&var, "missing_value"))
            .map(|f| f as f32);

        Ok(raw
            .into_iter()
            .map(|value| {
                let is_fill = match fill_value {
                    Some(fill) => value == fill || (value.is_nan() && fill.is_nan()),
                    None => false,
                };
                if is_fill {
                    f32::NAN
                } else {
                    value * scale_factor + add_offset
                }
            })
            .collect())
    }

    /// Decode the time variable to UTC datetimes using its CF `units` epoch.
    ///
    /// CDR files frequently use non-CF `months since` units; those are
    /// rejected here, which is why callers default to the coverage attributes
    /// instead (`decode_times = false`).
    pub fn decoded_times(&self) -> NetCdfResult<Vec<DateTime<Utc>>> {
        let var = self
            .file
            .variable("time")
            .ok_or_else(|| NetCdfError::MissingData("time variable".to_string()))?;
        let units = crate::variable::str_attr(&var, "units")
            .ok_or_else(|| NetCdfError::MissingData("time units attribute".to_string()))?;

        let (unit, epoch_str) = units.split_once(" since ").ok_or_else(|| {
            NetCdfError::InvalidFormat(format!("Unsupported time units: {}", units))
        })?;
        let seconds_per_unit: f64 = match unit.trim() {
            "seconds" | "second" => 1.0,
            "minutes" | "minute" => 60.0,
            "hours" | "hour" => 3_600.0,
            "days" | "day" => 86_400.0,
            other => {
                return Err(NetCdfError::InvalidFormat(format!(
                    "Non-CF time unit '{}' cannot be decoded",
                    other
                )))
            }
        };

        let epoch = parse_datetime(&epoch_str.trim().replace(' ', "T"))
            .map_err(|e| NetCdfError::InvalidFormat(e.to_string()))?;

        let values: Vec<f64> = var
            .get_values(..)
            .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read time: {}", e)))?;
        Ok(values
            .into_iter()
            .map(|v| epoch + Duration::seconds((v * seconds_per_unit) as i64))
            .collect())
    }
}
