use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::product::Product;

/// A fetch failure. Every variant raised while talking to the API or decoding
/// a record names the product it happened for; all of these are fatal to the
/// run (an unexpected envelope shape is not an error, it is a logged skip).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build the HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {product} ({url})")]
    NetworkRequest {
        product: Product,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {product} with status {status}")]
    HttpStatus {
        product: Product,
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read the response body for {product}")]
    BodyRead {
        product: Product,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response body for {product} is not valid JSON")]
    JsonDecode {
        product: Product,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unparseable timestamp {raw:?} in a {product} record")]
    TimestampParse {
        product: Product,
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Unparseable value {raw:?} in a {product} record")]
    ValueParse {
        product: Product,
        raw: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Non-finite value {raw:?} in a {product} record")]
    NonFiniteValue { product: Product, raw: String },

    #[error("{product} record at {timestamp} has no {field:?} field")]
    MissingValueField {
        product: Product,
        field: &'static str,
        timestamp: DateTime<Utc>,
    },
}
