use chrono::{DateTime, Utc};

use crate::types::product::Product;

/// A single timestamped reading from a station.
///
/// `value` is `None` when the station reported the sample with an empty
/// value field, which CO-OPS does for gaps instead of omitting the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Instant of the reading. Queries are made in GMT, so this is UTC.
    pub timestamp: DateTime<Utc>,
    /// The measured value, if the station reported one.
    pub value: Option<f64>,
}

impl Observation {
    /// Timestamp as milliseconds since the Unix epoch, the unit the chart's
    /// time axis works in.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// All observations fetched for one product, in the order the API returned
/// them (ascending by timestamp).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSeries {
    pub product: Product,
    pub observations: Vec<Observation>,
}

impl ProductSeries {
    pub fn new(product: Product, observations: Vec<Observation>) -> Self {
        Self {
            product,
            observations,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
