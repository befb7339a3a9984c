//! HTTP access to the CO-OPS data getter: one GET per product, envelope
//! handling, and the skip-on-unexpected-shape rule.

use std::time::Duration;

use log::{info, warn};
use reqwest::Client;

use crate::config::FetchConfig;
use crate::coops::error::FetchError;
use crate::coops::response::CoopsResponse;
use crate::types::dataset::Dataset;
use crate::types::observation::ProductSeries;
use crate::types::product::Product;

/// Production endpoint of the CO-OPS data getter.
pub const DEFAULT_BASE_URL: &str = "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter";

/// Applied to every request; the upstream API occasionally stalls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the NOAA CO-OPS tidal-data API.
///
/// Holds the fixed [`FetchConfig`] and a reused HTTP connection. The six
/// product fetches run strictly one after another; there is no parallelism
/// and no retrying.
///
/// # Examples
///
/// ```no_run
/// use tidelapse::{CoopsClient, FetchConfig, FetchError};
///
/// # async fn run() -> Result<(), FetchError> {
/// let client = CoopsClient::new(FetchConfig::trident_pier())?;
/// let dataset = client.fetch_dataset().await?;
/// println!("fetched {} series", dataset.len());
/// # Ok(())
/// # }
/// ```
pub struct CoopsClient {
    config: FetchConfig,
    base_url: String,
    http: Client,
}

impl CoopsClient {
    /// Creates a client against the production endpoint.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom endpoint. Tests point this at a
    /// local server.
    pub fn with_base_url(
        config: FetchConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self {
            config,
            base_url: base_url.into(),
            http,
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn request_url(&self, product: Product) -> String {
        format!(
            "{}?begin_date={}&end_date={}&station={}&product={}&datum={}&time_zone={}&units={}&format=json",
            self.base_url,
            self.config.begin_date_param(),
            self.config.end_date_param(),
            self.config.station,
            product.query_value(),
            self.config.datum.query_value(),
            self.config.time_zone.query_value(),
            self.config.units.query_value(),
        )
    }

    /// Fetches the record list for one product.
    ///
    /// `Ok(None)` means the body was JSON but had an unexpected shape: not
    /// an object at all, or an object carrying neither a `data` nor a
    /// `predictions` array. The skip is logged and the caller moves on with
    /// a smaller dataset. Network failures, non-2xx statuses, non-JSON
    /// bodies and malformed records are all fatal and carry the product in
    /// the error.
    pub async fn fetch_product(
        &self,
        product: Product,
    ) -> Result<Option<ProductSeries>, FetchError> {
        let url = self.request_url(product);
        info!("requesting {} from {}", product, url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::NetworkRequest {
                product,
                url: url.clone(),
                source,
            })?;

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(source) => {
                warn!("HTTP error for {}: {}", product, source);
                return Err(match source.status() {
                    Some(status) => FetchError::HttpStatus {
                        product,
                        url,
                        status,
                        source,
                    },
                    None => FetchError::NetworkRequest {
                        product,
                        url,
                        source,
                    },
                });
            }
        };

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::BodyRead { product, source })?;

        // An array or bare scalar body has no data/predictions keys either,
        // so it falls under the skip rule, not the fatal-decode rule.
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|source| FetchError::JsonDecode { product, source })?;
        if !value.is_object() {
            warn!("skipping {}: response body is JSON but not an object", product);
            return Ok(None);
        }
        let decoded: CoopsResponse = serde_json::from_value(value)
            .map_err(|source| FetchError::JsonDecode { product, source })?;

        let Some(records) = decoded.records() else {
            match decoded.error_message() {
                Some(message) => {
                    warn!("skipping {}: API answered with an error: {}", product, message)
                }
                None => warn!(
                    "skipping {}: response carries neither a data nor a predictions array",
                    product
                ),
            }
            return Ok(None);
        };

        let mut observations = Vec::with_capacity(records.len());
        for record in records {
            observations.push(record.to_observation(product)?);
        }
        info!("fetched {} {} records", observations.len(), product);
        Ok(Some(ProductSeries::new(product, observations)))
    }

    /// Fetches all six products in fixed order.
    ///
    /// Skipped products are simply absent from the returned dataset; any
    /// fatal per-product failure aborts the whole fetch.
    pub async fn fetch_dataset(&self) -> Result<Dataset, FetchError> {
        let mut dataset = Dataset::new();
        for product in Product::ALL {
            if let Some(series) = self.fetch_product(product).await? {
                dataset.insert(series);
            }
        }
        Ok(dataset)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `responses` to that many sequential requests, then closes.
    /// Returns the base url to hand to [`CoopsClient::with_base_url`].
    ///
    /// [`CoopsClient::with_base_url`]: super::CoopsClient::with_base_url
    pub(crate) async fn serve(responses: Vec<(u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await.unwrap();
                let reason = if status == 200 { "OK" } else { "Not Found" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len(),
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });
        format!("http://{addr}/api/prod/datagetter")
    }
}
