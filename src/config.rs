//! Immutable fetch configuration: which station, which dates, and the fixed
//! API knobs (datum, units, time zone) the CO-OPS data getter expects.

use bon::Builder;
use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Vertical reference level used to normalize water-level measurements.
///
/// The query parameter value is the NOAA datum code in upper case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Datum {
    /// Mean higher high water, the default datum for this crate.
    #[default]
    Mhhw,
    /// Mean high water.
    Mhw,
    /// Mean tide level.
    Mtl,
    /// Mean sea level.
    Msl,
    /// Mean low water.
    Mlw,
    /// Mean lower low water.
    Mllw,
    /// North American Vertical Datum of 1988.
    Navd,
    /// Station datum.
    Stnd,
}

impl Datum {
    pub fn query_value(&self) -> &'static str {
        match self {
            Datum::Mhhw => "MHHW",
            Datum::Mhw => "MHW",
            Datum::Mtl => "MTL",
            Datum::Msl => "MSL",
            Datum::Mlw => "MLW",
            Datum::Mllw => "MLLW",
            Datum::Navd => "NAVD",
            Datum::Stnd => "STND",
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_value())
    }
}

/// Measurement unit system requested from the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Units {
    /// Meters, m/s, hPa, degrees Celsius.
    #[default]
    Metric,
    /// Feet, knots, mb, degrees Fahrenheit.
    English,
}

impl Units {
    pub fn query_value(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::English => "english",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_value())
    }
}

/// Time zone the API reports record timestamps in.
///
/// Everything downstream assumes GMT; the other variants exist because the
/// API accepts them, not because the chart handles local time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiTimeZone {
    /// Greenwich mean time.
    #[default]
    Gmt,
    /// Local standard time at the station.
    Lst,
    /// Local standard/daylight time at the station.
    LstLdt,
}

impl ApiTimeZone {
    pub fn query_value(&self) -> &'static str {
        match self {
            ApiTimeZone::Gmt => "gmt",
            ApiTimeZone::Lst => "lst",
            ApiTimeZone::LstLdt => "lst_ldt",
        }
    }
}

impl fmt::Display for ApiTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_value())
    }
}

/// Everything the fetcher needs to build its six request URLs, fixed for the
/// lifetime of a run.
///
/// Use [`FetchConfig::trident_pier`] for the stock station and range, or the
/// builder for anything else:
///
/// ```
/// use chrono::NaiveDate;
/// use tidelapse::{Datum, FetchConfig};
///
/// let config = FetchConfig::builder()
///     .station("9414290")
///     .station_label("San Francisco")
///     .begin_date(NaiveDate::from_ymd_opt(2024, 10, 8).unwrap())
///     .end_date(NaiveDate::from_ymd_opt(2024, 10, 12).unwrap())
///     .datum(Datum::Mllw)
///     .build();
///
/// assert_eq!(config.begin_date_param(), "20241008");
/// assert_eq!(config.datum, Datum::Mllw);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct FetchConfig {
    /// Numeric CO-OPS station id, e.g. `8721604`.
    #[builder(into)]
    pub station: String,
    /// Human-readable station name used in the chart title.
    #[builder(into)]
    pub station_label: String,
    /// First day of the range (inclusive).
    pub begin_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
    #[builder(default)]
    pub datum: Datum,
    #[builder(default)]
    pub units: Units,
    #[builder(default)]
    pub time_zone: ApiTimeZone,
}

impl FetchConfig {
    /// The stock configuration: station 8721604 (Trident Pier, Port
    /// Canaveral FL), Oct 8-12 2024, MHHW datum, metric units, GMT.
    pub fn trident_pier() -> Self {
        Self::builder()
            .station("8721604")
            .station_label("Trident Pier")
            .begin_date(NaiveDate::from_ymd_opt(2024, 10, 8).expect("valid date"))
            .end_date(NaiveDate::from_ymd_opt(2024, 10, 12).expect("valid date"))
            .build()
    }

    /// `begin_date` in the `YYYYMMDD` form the query string wants.
    pub fn begin_date_param(&self) -> String {
        self.begin_date.format("%Y%m%d").to_string()
    }

    /// `end_date` in the `YYYYMMDD` form the query string wants.
    pub fn end_date_param(&self) -> String {
        self.end_date.format("%Y%m%d").to_string()
    }

    /// Compact label for the date range, e.g. `Oct 8-12, 2024`.
    pub fn date_span_label(&self) -> String {
        let (begin, end) = (self.begin_date, self.end_date);
        if begin == end {
            format!("{} {}, {}", begin.format("%b"), begin.day(), begin.year())
        } else if begin.year() == end.year() && begin.month() == end.month() {
            format!(
                "{} {}-{}, {}",
                begin.format("%b"),
                begin.day(),
                end.day(),
                begin.year()
            )
        } else if begin.year() == end.year() {
            format!(
                "{} {} - {} {}, {}",
                begin.format("%b"),
                begin.day(),
                end.format("%b"),
                end.day(),
                begin.year()
            )
        } else {
            format!(
                "{} {}, {} - {} {}, {}",
                begin.format("%b"),
                begin.day(),
                begin.year(),
                end.format("%b"),
                end.day(),
                end.year()
            )
        }
    }

    /// Title shown above the chart.
    pub fn chart_title(&self) -> String {
        format!(
            "All Parameters at {} ({}) - Simulated Real-time",
            self.station_label,
            self.date_span_label()
        )
    }
}
