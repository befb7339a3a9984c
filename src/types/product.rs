//! The six CO-OPS products this crate works with, plus the per-product
//! quirks of the upstream API: query names, value fields and axis labels.

use std::fmt;

/// One of the observation products served by the CO-OPS data API.
///
/// The variants are ordered the way the pipeline fetches and the chart
/// stacks them, bottom band first. That ordering is also the `Ord` of the
/// type, so keyed collections iterate in display order.
///
/// # Examples
///
/// ```
/// use tidelapse::Product;
///
/// assert_eq!(Product::ALL.len(), 6);
/// assert_eq!(Product::Wind.axis_label(), "Wind (m/s)");
/// assert_eq!(Product::TidePredictions.to_string(), "predictions");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Product {
    Wind,
    AirPressure,
    WaterLevel,
    TidePredictions,
    WaterTemperature,
    AirTemperature,
}

impl Product {
    /// Every product, in fetch and display order.
    pub const ALL: [Product; 6] = [
        Product::Wind,
        Product::AirPressure,
        Product::WaterLevel,
        Product::TidePredictions,
        Product::WaterTemperature,
        Product::AirTemperature,
    ];

    /// Value for the `product` query parameter.
    ///
    /// Tide predictions are served by the `predictions` endpoint name, not
    /// `tide_predictions`, and answer under a `predictions` envelope key
    /// instead of `data`.
    pub fn query_value(&self) -> &'static str {
        match self {
            Product::Wind => "wind",
            Product::AirPressure => "air_pressure",
            Product::WaterLevel => "water_level",
            Product::TidePredictions => "predictions",
            Product::WaterTemperature => "water_temperature",
            Product::AirTemperature => "air_temperature",
        }
    }

    /// Name of the record field holding this product's value.
    ///
    /// Wind records carry their speed in `s`; every other product reports
    /// its value in `v`. Water level records also have an `s` field, but
    /// there it is the measurement sigma and must not be read as the value.
    pub(crate) fn value_field(&self) -> &'static str {
        match self {
            Product::Wind => "s",
            _ => "v",
        }
    }

    /// Label shown on this product's value axis, units included.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Product::Wind => "Wind (m/s)",
            Product::AirPressure => "Pressure (hPa)",
            Product::WaterLevel => "Water Lvl (m)",
            Product::TidePredictions => "Tide Pred. (m)",
            Product::WaterTemperature => "Water Temp (°C)",
            Product::AirTemperature => "Air Temp (°C)",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_value())
    }
}
