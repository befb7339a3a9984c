//! Merges the per-product series into one ordered playback timeline.
//!
//! The upstream API is trusted to return index-aligned, equal-length series,
//! but nothing enforces that. Merging by timestamp instead of replaying by
//! index means a short, gappy or misordered series can never shift another
//! product's points onto the wrong instant.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::types::dataset::Dataset;
use crate::types::product::Product;

/// One product's reading inside a frame. `value` is `None` when the station
/// reported the instant with an empty value field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub product: Product,
    pub value: Option<f64>,
}

/// One playback step: every sample that shares a single timestamp, in
/// product order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestamp: DateTime<Utc>,
    pub samples: Vec<Sample>,
}

/// All frames of a dataset in ascending timestamp order.
///
/// The timeline is the union of every product's timestamps: a product
/// absent at an instant simply contributes no sample there. With the
/// API's usual index-aligned responses this degenerates to exactly one
/// frame per record index, six samples each.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackTimeline {
    frames: Vec<Frame>,
}

impl PlaybackTimeline {
    /// Merges `dataset` by timestamp. Within one product, a duplicated
    /// timestamp keeps the last record.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut by_instant: BTreeMap<DateTime<Utc>, BTreeMap<Product, Option<f64>>> =
            BTreeMap::new();
        for (product, series) in dataset.iter() {
            for observation in &series.observations {
                by_instant
                    .entry(observation.timestamp)
                    .or_default()
                    .insert(product, observation.value);
            }
        }

        let frames = by_instant
            .into_iter()
            .map(|(timestamp, samples)| Frame {
                timestamp,
                samples: samples
                    .into_iter()
                    .map(|(product, value)| Sample { product, value })
                    .collect(),
            })
            .collect();
        Self { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of playback steps.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::types::observation::{Observation, ProductSeries};

    use super::*;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 8, 0, minute, 0).unwrap()
    }

    fn series(product: Product, points: &[(u32, Option<f64>)]) -> ProductSeries {
        ProductSeries::new(
            product,
            points
                .iter()
                .map(|(minute, value)| Observation {
                    timestamp: at(*minute),
                    value: *value,
                })
                .collect(),
        )
    }

    #[test]
    fn aligned_series_merge_into_lockstep_frames() {
        let mut dataset = Dataset::new();
        dataset.insert(series(Product::Wind, &[(0, Some(2.5)), (6, Some(2.7))]));
        dataset.insert(series(Product::WaterLevel, &[(0, Some(1.0)), (6, Some(1.1))]));

        let timeline = PlaybackTimeline::from_dataset(&dataset);
        assert_eq!(timeline.len(), 2);

        let first = &timeline.frames()[0];
        assert_eq!(first.timestamp, at(0));
        assert_eq!(
            first.samples,
            vec![
                Sample { product: Product::Wind, value: Some(2.5) },
                Sample { product: Product::WaterLevel, value: Some(1.0) },
            ]
        );
    }

    #[test]
    fn unequal_series_union_without_misalignment() {
        let mut dataset = Dataset::new();
        dataset.insert(series(Product::Wind, &[(0, Some(2.5)), (6, Some(2.7)), (12, Some(3.0))]));
        dataset.insert(series(Product::AirTemperature, &[(6, Some(21.0))]));

        let timeline = PlaybackTimeline::from_dataset(&dataset);
        assert_eq!(timeline.len(), 3);

        assert_eq!(timeline.frames()[0].samples.len(), 1);
        assert_eq!(timeline.frames()[1].samples.len(), 2);
        assert_eq!(timeline.frames()[2].samples.len(), 1);

        // The lone air temperature sample lands on its own instant, not on
        // whatever index it happened to occupy.
        let middle = &timeline.frames()[1];
        assert_eq!(middle.timestamp, at(6));
        assert!(middle
            .samples
            .iter()
            .any(|sample| sample.product == Product::AirTemperature && sample.value == Some(21.0)));
    }

    #[test]
    fn out_of_order_records_are_replayed_in_time_order() {
        let mut dataset = Dataset::new();
        dataset.insert(series(Product::Wind, &[(12, Some(3.0)), (0, Some(2.5))]));

        let timeline = PlaybackTimeline::from_dataset(&dataset);
        let timestamps: Vec<DateTime<Utc>> = timeline
            .frames()
            .iter()
            .map(|frame| frame.timestamp)
            .collect();
        assert_eq!(timestamps, vec![at(0), at(12)]);
    }

    #[test]
    fn duplicate_timestamp_keeps_the_last_record() {
        let mut dataset = Dataset::new();
        dataset.insert(series(Product::Wind, &[(0, Some(2.5)), (0, Some(9.0))]));

        let timeline = PlaybackTimeline::from_dataset(&dataset);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.frames()[0].samples[0].value, Some(9.0));
    }

    #[test]
    fn empty_values_survive_the_merge() {
        let mut dataset = Dataset::new();
        dataset.insert(series(Product::Wind, &[(0, None)]));

        let timeline = PlaybackTimeline::from_dataset(&dataset);
        assert_eq!(timeline.frames()[0].samples[0].value, None);
    }

    #[test]
    fn empty_dataset_makes_an_empty_timeline() {
        let timeline = PlaybackTimeline::from_dataset(&Dataset::new());
        assert!(timeline.is_empty());
        assert_eq!(timeline.len(), 0);
    }

    #[test]
    fn samples_within_a_frame_follow_product_order() {
        let mut dataset = Dataset::new();
        dataset.insert(series(Product::AirTemperature, &[(0, Some(21.0))]));
        dataset.insert(series(Product::Wind, &[(0, Some(2.5))]));
        dataset.insert(series(Product::TidePredictions, &[(0, Some(0.1))]));

        let timeline = PlaybackTimeline::from_dataset(&dataset);
        let order: Vec<Product> = timeline.frames()[0]
            .samples
            .iter()
            .map(|sample| sample.product)
            .collect();
        assert_eq!(
            order,
            [Product::Wind, Product::TidePredictions, Product::AirTemperature]
        );
    }
}
