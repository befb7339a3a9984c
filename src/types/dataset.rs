//! The in-memory collection of everything fetched for one station, plus the
//! time-range aggregation that sizes the chart's shared time axis.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::observation::{Observation, ProductSeries};
use crate::types::product::Product;
use crate::types::time_range::TimeRange;

/// Returned by [`Dataset::time_range`] when there is not a single observation
/// to aggregate. Min/max over an empty pool is undefined, so it is guarded
/// here instead of panicking deep inside an iterator chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Dataset holds no observations, cannot compute a time range")]
pub struct EmptyDatasetError;

/// Everything fetched for one station over one date range.
///
/// One [`ProductSeries`] per product that answered with a usable record list.
/// Products skipped during the fetch simply have no entry. The map is keyed
/// on [`Product`], so iteration follows the fixed product order.
///
/// Built once by the fetcher, then only read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    series: BTreeMap<Product, ProductSeries>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series, replacing any earlier series for the same product.
    pub fn insert(&mut self, series: ProductSeries) {
        self.series.insert(series.product, series);
    }

    pub fn get(&self, product: Product) -> Option<&ProductSeries> {
        self.series.get(&product)
    }

    pub fn contains(&self, product: Product) -> bool {
        self.series.contains_key(&product)
    }

    /// Series in product order.
    pub fn iter(&self) -> impl Iterator<Item = (Product, &ProductSeries)> {
        self.series.iter().map(|(product, series)| (*product, series))
    }

    /// Number of series, not observations.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Every observation across every product, in product order.
    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.series
            .values()
            .flat_map(|series| series.observations.iter())
    }

    pub fn observation_count(&self) -> usize {
        self.series.values().map(ProductSeries::len).sum()
    }

    /// The earliest and latest timestamp across every series.
    ///
    /// Empty-valued observations still carry a timestamp and still count; a
    /// dataset whose series are all empty (or that has no series) yields
    /// [`EmptyDatasetError`].
    pub fn time_range(&self) -> Result<TimeRange, EmptyDatasetError> {
        let mut range: Option<TimeRange> = None;
        for observation in self.observations() {
            range = Some(match range {
                Some(range) => range.extended_to(observation.timestamp),
                None => TimeRange::single(observation.timestamp),
            });
        }
        range.ok_or(EmptyDatasetError)
    }
}
