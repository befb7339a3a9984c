//! The chart model the replay drives and the seam it drives it through.
//!
//! The player never touches a widget. It emits [`PlaybackEvent`]s into a
//! [`ChartSink`]; the terminal dashboard consumes them through a channel,
//! tests consume them with an in-memory recorder.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;

use crate::replay::error::ReplayError;
use crate::types::product::Product;
use crate::types::time_range::TimeRange;

/// Margin placed on the inner-facing edges of each stacked axis band; the
/// outermost edges get none.
pub const AXIS_STACK_MARGIN: u16 = 15;

/// One stacked value axis plus the series that draws on it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBand {
    pub product: Product,
    /// Axis label, units included.
    pub label: &'static str,
    /// Margin on the edge facing the previous band in the stack.
    pub margin_start: u16,
    /// Margin on the edge facing the next band in the stack.
    pub margin_end: u16,
    /// Placeholder value range shown until data arrives; the renderer
    /// auto-scales once points are appended.
    pub initial_range: (f64, f64),
}

/// Static description of the whole chart: title, shared time axis window,
/// and one [`AxisBand`] per product in stack order (first band at the
/// bottom).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub window: TimeRange,
    pub bands: Vec<AxisBand>,
}

impl ChartSpec {
    /// Builds the spec for the fixed six-product stack over `window`.
    pub fn new(title: impl Into<String>, window: TimeRange) -> Self {
        let last = Product::ALL.len() - 1;
        let bands = Product::ALL
            .iter()
            .enumerate()
            .map(|(index, product)| AxisBand {
                product: *product,
                label: product.axis_label(),
                margin_start: if index > 0 { AXIS_STACK_MARGIN } else { 0 },
                margin_end: if index < last { AXIS_STACK_MARGIN } else { 0 },
                initial_range: (0.0, 1.0),
            })
            .collect();
        Self {
            title: title.into(),
            window,
            bands,
        }
    }
}

/// One step of chart progress, emitted by the player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// Append a point to the product's series.
    Point {
        product: Product,
        /// Timestamp on the chart's millisecond epoch scale.
        x_ms: i64,
        value: f64,
    },
    /// The product reported this instant with an empty value; nothing is
    /// appended, but the chart may surface a counter.
    Skip {
        product: Product,
        timestamp: DateTime<Utc>,
    },
    /// Every frame has been replayed; the chart stays open and static.
    Finished,
}

/// Consumer side of the playback stream.
pub trait ChartSink {
    /// Accepts one event. An error stops the replay immediately.
    fn on_event(&mut self, event: PlaybackEvent) -> Result<(), ReplayError>;
}

/// Sink that forwards every event over an unbounded channel to the
/// dashboard task. Reports [`ReplayError::SinkClosed`] once the receiver is
/// gone.
pub struct ChannelSink {
    tx: UnboundedSender<PlaybackEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<PlaybackEvent>) -> Self {
        Self { tx }
    }
}

impl ChartSink for ChannelSink {
    fn on_event(&mut self, event: PlaybackEvent) -> Result<(), ReplayError> {
        self.tx.send(event).map_err(|_| ReplayError::SinkClosed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tokio::sync::mpsc;

    use super::*;

    fn window() -> TimeRange {
        TimeRange {
            start: Utc.with_ymd_and_hms(2024, 10, 8, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 10, 12, 23, 54, 0).unwrap(),
        }
    }

    #[test]
    fn spec_stacks_one_band_per_product() {
        let spec = ChartSpec::new("title", window());
        assert_eq!(spec.bands.len(), 6);
        let products: Vec<Product> = spec.bands.iter().map(|band| band.product).collect();
        assert_eq!(products, Product::ALL);
        assert_eq!(spec.bands[0].label, "Wind (m/s)");
    }

    #[test]
    fn margins_sit_on_inner_edges_only() {
        let spec = ChartSpec::new("title", window());
        assert_eq!(spec.bands[0].margin_start, 0);
        assert_eq!(spec.bands[0].margin_end, AXIS_STACK_MARGIN);
        for band in &spec.bands[1..5] {
            assert_eq!(band.margin_start, AXIS_STACK_MARGIN);
            assert_eq!(band.margin_end, AXIS_STACK_MARGIN);
        }
        assert_eq!(spec.bands[5].margin_start, AXIS_STACK_MARGIN);
        assert_eq!(spec.bands[5].margin_end, 0);
    }

    #[test]
    fn bands_start_with_the_placeholder_range() {
        let spec = ChartSpec::new("title", window());
        assert!(spec.bands.iter().all(|band| band.initial_range == (0.0, 1.0)));
    }

    #[tokio::test]
    async fn channel_sink_forwards_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sink = ChannelSink::new(tx);
        let event = PlaybackEvent::Point {
            product: Product::Wind,
            x_ms: 1_728_345_600_000,
            value: 2.5,
        };

        sink.on_event(event.clone()).unwrap();
        assert_eq!(rx.recv().await, Some(event));
    }

    #[tokio::test]
    async fn channel_sink_reports_a_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sink = ChannelSink::new(tx);
        drop(rx);

        let result = sink.on_event(PlaybackEvent::Finished);
        assert_eq!(result, Err(ReplayError::SinkClosed));
    }
}
