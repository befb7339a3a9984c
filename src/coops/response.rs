//! Serde model of the CO-OPS data getter response envelope and the
//! record-to-observation conversion rules.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::coops::error::FetchError;
use crate::types::observation::Observation;
use crate::types::product::Product;

/// Record timestamps come back as `2024-10-08 13:42` in the requested time
/// zone, which this crate always asks for in GMT.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Top-level response shape.
///
/// Observation products answer under `data`, tide predictions under
/// `predictions`, and errors (bad station id, no data in range) as an
/// `error` object with a message. `metadata` and any other keys are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct CoopsResponse {
    #[serde(default)]
    data: Option<Vec<CoopsRecord>>,
    #[serde(default)]
    predictions: Option<Vec<CoopsRecord>>,
    #[serde(default)]
    error: Option<CoopsApiError>,
}

#[derive(Debug, Deserialize)]
struct CoopsApiError {
    message: String,
}

impl CoopsResponse {
    /// The record list, wherever the envelope put it. `data` wins when both
    /// keys are somehow present.
    pub(crate) fn records(&self) -> Option<&[CoopsRecord]> {
        self.data.as_deref().or(self.predictions.as_deref())
    }

    /// The API-side error message, if the body carried the error envelope.
    pub(crate) fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|error| error.message.trim())
    }
}

/// One record inside a `data` or `predictions` array.
///
/// `v` is the generic value field; `s` is the speed for wind records and the
/// measurement sigma for water-level records. Which one holds the product's
/// value is decided by [`Product::value_field`]. Flag fields (`f`, `q`, `d`,
/// `g`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CoopsRecord {
    pub(crate) t: String,
    #[serde(default)]
    pub(crate) v: Option<String>,
    #[serde(default)]
    pub(crate) s: Option<String>,
}

impl CoopsRecord {
    fn raw_value(&self, product: Product) -> Option<&str> {
        match product.value_field() {
            "s" => self.s.as_deref(),
            _ => self.v.as_deref(),
        }
    }

    /// Converts the record into an [`Observation`] for `product`.
    ///
    /// An empty value string becomes `None` (the station reported a gap).
    /// Anything else must parse as a finite float, and the value field must
    /// exist at all; both are fatal otherwise, because they mean the response
    /// is not what this client understands.
    pub(crate) fn to_observation(&self, product: Product) -> Result<Observation, FetchError> {
        let timestamp = NaiveDateTime::parse_from_str(&self.t, TIMESTAMP_FORMAT)
            .map_err(|source| FetchError::TimestampParse {
                product,
                raw: self.t.clone(),
                source,
            })?
            .and_utc();

        let field = product.value_field();
        let raw = self
            .raw_value(product)
            .ok_or(FetchError::MissingValueField {
                product,
                field,
                timestamp,
            })?;

        let value = if raw.is_empty() {
            None
        } else {
            let parsed: f64 = raw.parse().map_err(|source| FetchError::ValueParse {
                product,
                raw: raw.to_owned(),
                source,
            })?;
            if !parsed.is_finite() {
                return Err(FetchError::NonFiniteValue {
                    product,
                    raw: raw.to_owned(),
                });
            }
            Some(parsed)
        };

        Ok(Observation { timestamp, value })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(t: &str, v: Option<&str>, s: Option<&str>) -> CoopsRecord {
        CoopsRecord {
            t: t.to_owned(),
            v: v.map(str::to_owned),
            s: s.map(str::to_owned),
        }
    }

    #[test]
    fn data_envelope_yields_records() {
        let response: CoopsResponse = serde_json::from_str(
            r#"{
                "metadata": {"id": "8721604", "name": "Trident Pier, Port Canaveral", "lat": "28.4158", "lon": "-80.5931"},
                "data": [
                    {"t": "2024-10-08 00:00", "v": "1.23", "f": "0,0,0"},
                    {"t": "2024-10-08 00:06", "v": "1.31", "f": "0,0,0"}
                ]
            }"#,
        )
        .unwrap();

        let records = response.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].t, "2024-10-08 00:00");
        assert_eq!(records[0].v.as_deref(), Some("1.23"));
        assert_eq!(response.error_message(), None);
    }

    #[test]
    fn predictions_envelope_yields_records() {
        let response: CoopsResponse = serde_json::from_str(
            r#"{"predictions": [{"t": "2024-10-08 00:00", "v": "0.05"}]}"#,
        )
        .unwrap();
        assert_eq!(response.records().unwrap().len(), 1);
    }

    #[test]
    fn data_wins_over_predictions_when_both_present() {
        let response: CoopsResponse = serde_json::from_str(
            r#"{
                "data": [{"t": "2024-10-08 00:00", "v": "1.0"}],
                "predictions": [{"t": "2024-10-08 00:00", "v": "2.0"}, {"t": "2024-10-08 00:06", "v": "2.1"}]
            }"#,
        )
        .unwrap();
        let records = response.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].v.as_deref(), Some("1.0"));
    }

    #[test]
    fn missing_envelope_reports_the_api_error_message() {
        let response: CoopsResponse = serde_json::from_str(
            r#"{"error": {"message": " No data was found. This product may not be offered at this station. "}}"#,
        )
        .unwrap();
        assert!(response.records().is_none());
        assert_eq!(
            response.error_message(),
            Some("No data was found. This product may not be offered at this station.")
        );
    }

    #[test]
    fn empty_object_has_neither_records_nor_message() {
        let response: CoopsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.records().is_none());
        assert!(response.error_message().is_none());
    }

    #[test]
    fn value_record_converts_to_observation() {
        let observation = record("2024-10-08 00:00", Some("1.23"), None)
            .to_observation(Product::WaterLevel)
            .unwrap();
        assert_eq!(
            observation.timestamp,
            Utc.with_ymd_and_hms(2024, 10, 8, 0, 0, 0).unwrap()
        );
        assert_eq!(observation.value, Some(1.23));
    }

    #[test]
    fn wind_reads_speed_not_value() {
        let observation = record("2024-10-08 00:00", Some("9.9"), Some("2.5"))
            .to_observation(Product::Wind)
            .unwrap();
        assert_eq!(observation.value, Some(2.5));
    }

    #[test]
    fn water_level_sigma_is_not_mistaken_for_the_value() {
        let observation = record("2024-10-08 00:00", Some("1.23"), Some("0.004"))
            .to_observation(Product::WaterLevel)
            .unwrap();
        assert_eq!(observation.value, Some(1.23));
    }

    #[test]
    fn empty_value_string_becomes_none() {
        let observation = record("2024-10-08 00:06", Some(""), None)
            .to_observation(Product::AirPressure)
            .unwrap();
        assert_eq!(observation.value, None);
    }

    #[test]
    fn garbage_timestamp_is_fatal() {
        let error = record("yesterday-ish", Some("1.0"), None)
            .to_observation(Product::AirTemperature)
            .unwrap_err();
        assert!(matches!(
            error,
            FetchError::TimestampParse { product: Product::AirTemperature, .. }
        ));
    }

    #[test]
    fn garbage_value_is_fatal() {
        let error = record("2024-10-08 00:00", Some("n/a"), None)
            .to_observation(Product::WaterTemperature)
            .unwrap_err();
        assert!(matches!(error, FetchError::ValueParse { raw, .. } if raw == "n/a"));
    }

    #[test]
    fn non_finite_value_is_fatal() {
        let error = record("2024-10-08 00:00", Some("inf"), None)
            .to_observation(Product::WaterLevel)
            .unwrap_err();
        assert!(matches!(error, FetchError::NonFiniteValue { .. }));

        let error = record("2024-10-08 00:00", Some("NaN"), None)
            .to_observation(Product::WaterLevel)
            .unwrap_err();
        assert!(matches!(error, FetchError::NonFiniteValue { .. }));
    }

    #[test]
    fn missing_value_field_is_fatal() {
        let error = record("2024-10-08 00:00", None, Some("2.5"))
            .to_observation(Product::WaterLevel)
            .unwrap_err();
        assert!(matches!(
            error,
            FetchError::MissingValueField { field: "v", .. }
        ));

        let error = record("2024-10-08 00:00", Some("1.0"), None)
            .to_observation(Product::Wind)
            .unwrap_err();
        assert!(matches!(
            error,
            FetchError::MissingValueField { field: "s", .. }
        ));
    }
}
