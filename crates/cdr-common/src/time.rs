//! Time handling for climate data records.
//!
//! CDR NetCDF files describe their temporal coverage with global attributes
//! (`time_coverage_start`, `time_coverage_end`, `time_coverage_duration`,
//! `time_coverage_resolution`) rather than CF-decodable time variables, so
//! most of this module is about mapping those attribute strings onto concrete
//! UTC datetime windows.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid datetime format: {0}")]
    InvalidDatetime(String),

    #[error("Invalid ISO 8601 duration: {0}")]
    InvalidDuration(String),

    #[error("Unsupported time interval: {0}")]
    UnsupportedInterval(String),

    #[error("Datetime out of range: {0}")]
    OutOfRange(String),
}

/// Parse a datetime attribute value.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (assumed UTC), and bare dates.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = nd.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(TimeParseError::InvalidDatetime(s.to_string()))
}

fn utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Result<DateTime<Utc>, TimeParseError> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .ok_or_else(|| {
            TimeParseError::OutOfRange(format!("{year:04}-{month:02}-{day:02}"))
        })
}

/// Last day number of the given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Add whole months to a datetime, clamping the day to the target month.
pub fn add_months(dt: DateTime<Utc>, months: i32) -> Result<DateTime<Utc>, TimeParseError> {
    let total = dt.year() * 12 + dt.month() as i32 - 1 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = dt.day().min(days_in_month(year, month));
    utc(year, month, day, dt.hour(), dt.minute(), dt.second())
}

/// The temporal resolution of a CDR record.
///
/// Pentadal records are yearly-spaced five-year running windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeInterval {
    Monthly,
    Seasonal,
    Yearly,
    Pentadal,
}

impl TimeInterval {
    /// Parse the `time_coverage_resolution` attribute (`P01M`, `P03M`,
    /// `P01Y`, `P05Y`, with or without zero padding).
    pub fn from_resolution(resolution: &str) -> Result<Self, TimeParseError> {
        match resolution.trim().to_uppercase().as_str() {
            "P01M" | "P1M" => Ok(TimeInterval::Monthly),
            "P03M" | "P3M" => Ok(TimeInterval::Seasonal),
            "P01Y" | "P1Y" => Ok(TimeInterval::Yearly),
            "P05Y" | "P5Y" => Ok(TimeInterval::Pentadal),
            other => Err(TimeParseError::UnsupportedInterval(other.to_string())),
        }
    }

    /// Infer the interval from a file name token (`_yearly`, `_pentad`, ...).
    pub fn from_href(href: &str) -> Option<Self> {
        let lower = href.to_lowercase();
        if lower.contains("monthly") {
            Some(TimeInterval::Monthly)
        } else if lower.contains("seasonal") {
            Some(TimeInterval::Seasonal)
        } else if lower.contains("pentad") {
            Some(TimeInterval::Pentadal)
        } else if lower.contains("yearly") || lower.contains("annual") {
            Some(TimeInterval::Yearly)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInterval::Monthly => "monthly",
            TimeInterval::Seasonal => "seasonal",
            TimeInterval::Yearly => "yearly",
            TimeInterval::Pentadal => "pentadal",
        }
    }

    /// Months between consecutive records at this resolution.
    ///
    /// Pentadal records advance yearly; their five-year span is a window, not
    /// a step.
    pub fn step_months(&self) -> i32 {
        match self {
            TimeInterval::Monthly => 1,
            TimeInterval::Seasonal => 3,
            TimeInterval::Yearly => 12,
            TimeInterval::Pentadal => 12,
        }
    }

    /// The representative datetime of record `index`, counting from the
    /// coverage start.
    pub fn advance(
        &self,
        start: DateTime<Utc>,
        index: usize,
    ) -> Result<DateTime<Utc>, TimeParseError> {
        add_months(start, self.step_months() * index as i32)
    }

    /// Map a representative datetime to its STAC start/end datetime pair.
    pub fn datetime_interval(
        &self,
        dt: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), TimeParseError> {
        let year = dt.year();
        match self {
            TimeInterval::Monthly => {
                let month = dt.month();
                let start = utc(year, month, 1, 0, 0, 0)?;
                let end = utc(year, month, days_in_month(year, month), 23, 59, 59)?;
                Ok((start, end))
            }
            TimeInterval::Seasonal => {
                let season_start = (dt.month() - 1) / 3 * 3 + 1;
                let season_end = season_start + 2;
                let start = utc(year, season_start, 1, 0, 0, 0)?;
                let end = utc(year, season_end, days_in_month(year, season_end), 23, 59, 59)?;
                Ok((start, end))
            }
            TimeInterval::Yearly => {
                let start = utc(year, 1, 1, 0, 0, 0)?;
                let end = utc(year, 12, 31, 23, 59, 59)?;
                Ok((start, end))
            }
            TimeInterval::Pentadal => {
                let start = utc(year - 2, 1, 1, 0, 0, 0)?;
                let end = utc(year + 2, 12, 31, 23, 59, 59)?;
                Ok((start, end))
            }
        }
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar-aware ISO 8601 duration (`P66Y`, `P5Y`, `P3M`, `P10D`).
///
/// Only date components are supported; CDR coverage durations never carry a
/// time part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso8601Duration {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Iso8601Duration {
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let body = s
            .trim()
            .strip_prefix(['P', 'p'])
            .ok_or_else(|| TimeParseError::InvalidDuration(s.to_string()))?;
        if body.is_empty() || body.contains(['T', 't']) {
            return Err(TimeParseError::InvalidDuration(s.to_string()));
        }

        let mut duration = Iso8601Duration::default();
        let mut number = String::new();
        for c in body.chars() {
            if c.is_ascii_digit() {
                number.push(c);
                continue;
            }
            let value: u32 = number
                .parse()
                .map_err(|_| TimeParseError::InvalidDuration(s.to_string()))?;
            number.clear();
            match c.to_ascii_uppercase() {
                'Y' => duration.years = value,
                'M' => duration.months = value,
                'D' => duration.days = value,
                _ => return Err(TimeParseError::InvalidDuration(s.to_string())),
            }
        }
        if !number.is_empty() {
            return Err(TimeParseError::InvalidDuration(s.to_string()));
        }
        Ok(duration)
    }

    /// Add this duration to a datetime.
    pub fn add_to(&self, dt: DateTime<Utc>) -> Result<DateTime<Utc>, TimeParseError> {
        let shifted = add_months(dt, (self.years * 12 + self.months) as i32)?;
        Ok(shifted + chrono::Duration::days(self.days as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_datetime_variants() {
        let full = parse_datetime("1955-01-01T00:00:00Z").unwrap();
        let naive = parse_datetime("1955-01-01T00:00:00").unwrap();
        let date = parse_datetime("1955-01-01").unwrap();
        assert_eq!(full, naive);
        assert_eq!(full, date);
        assert_eq!(full.year(), 1955);
        assert!(parse_datetime("not-a-date").is_err());
    }

    #[test]
    fn test_interval_from_resolution() {
        assert_eq!(
            TimeInterval::from_resolution("P01Y").unwrap(),
            TimeInterval::Yearly
        );
        assert_eq!(
            TimeInterval::from_resolution("P1M").unwrap(),
            TimeInterval::Monthly
        );
        assert_eq!(
            TimeInterval::from_resolution("P03M").unwrap(),
            TimeInterval::Seasonal
        );
        assert_eq!(
            TimeInterval::from_resolution("P05Y").unwrap(),
            TimeInterval::Pentadal
        );
        assert!(TimeInterval::from_resolution("P02Y").is_err());
    }

    #[test]
    fn test_interval_from_href() {
        assert_eq!(
            TimeInterval::from_href("heat_content_anomaly_0-2000_yearly.nc"),
            Some(TimeInterval::Yearly)
        );
        assert_eq!(
            TimeInterval::from_href("heat_content_anomaly_0-700_pentad.nc"),
            Some(TimeInterval::Pentadal)
        );
        assert_eq!(TimeInterval::from_href("sea_ice.nc"), None);
    }

    #[test]
    fn test_yearly_interval() {
        let dt = parse_datetime("1955-06-15").unwrap();
        let (start, end) = TimeInterval::Yearly.datetime_interval(dt).unwrap();
        assert_eq!(start, parse_datetime("1955-01-01").unwrap());
        assert_eq!(end.year(), 1955);
        assert_eq!((end.month(), end.day()), (12, 31));
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    }

    #[test]
    fn test_monthly_interval_leap_february() {
        let dt = parse_datetime("2020-02-10").unwrap();
        let (start, end) = TimeInterval::Monthly.datetime_interval(dt).unwrap();
        assert_eq!(start, parse_datetime("2020-02-01").unwrap());
        assert_eq!(end.day(), 29);
    }

    #[test]
    fn test_seasonal_interval() {
        let dt = parse_datetime("2005-05-01").unwrap();
        let (start, end) = TimeInterval::Seasonal.datetime_interval(dt).unwrap();
        assert_eq!((start.month(), start.day()), (4, 1));
        assert_eq!((end.month(), end.day()), (6, 30));
    }

    #[test]
    fn test_pentadal_interval() {
        let dt = parse_datetime("1957-01-01").unwrap();
        let (start, end) = TimeInterval::Pentadal.datetime_interval(dt).unwrap();
        assert_eq!(start.year(), 1955);
        assert_eq!(end.year(), 1959);
    }

    #[test]
    fn test_advance() {
        let start = parse_datetime("1955-01-01").unwrap();
        let dt = TimeInterval::Yearly.advance(start, 10).unwrap();
        assert_eq!(dt.year(), 1965);
        let dt = TimeInterval::Monthly.advance(start, 13).unwrap();
        assert_eq!((dt.year(), dt.month()), (1956, 2));
        let dt = TimeInterval::Seasonal.advance(start, 3).unwrap();
        assert_eq!((dt.year(), dt.month()), (1955, 10));
    }

    #[test]
    fn test_duration_parse() {
        assert_eq!(
            Iso8601Duration::parse("P66Y").unwrap(),
            Iso8601Duration {
                years: 66,
                ..Default::default()
            }
        );
        let d = Iso8601Duration::parse("P1Y2M10D").unwrap();
        assert_eq!((d.years, d.months, d.days), (1, 2, 10));
        assert!(Iso8601Duration::parse("66Y").is_err());
        assert!(Iso8601Duration::parse("PT1H").is_err());
    }

    #[test]
    fn test_duration_add() {
        let start = parse_datetime("1955-01-01").unwrap();
        let end = Iso8601Duration::parse("P66Y").unwrap().add_to(start).unwrap();
        assert_eq!(end.year(), 2021);
    }
}
