//! The sequential replay loop: one frame per tick into a chart sink.

use log::{debug, warn};

use crate::replay::chart::{ChartSink, PlaybackEvent};
use crate::replay::error::ReplayError;
use crate::replay::ticker::Ticker;
use crate::replay::timeline::PlaybackTimeline;

/// Replays a [`PlaybackTimeline`] into a [`ChartSink`], one frame per tick.
///
/// A player is single-use: it consumes itself on [`Player::replay`], which
/// mirrors the one-way fetch, aggregate, replay pipeline. Present values
/// become [`PlaybackEvent::Point`]s; empty values are logged and become
/// [`PlaybackEvent::Skip`]s so the chart can surface them without plotting
/// anything.
pub struct Player<T> {
    timeline: PlaybackTimeline,
    ticker: T,
}

impl<T: Ticker> Player<T> {
    pub fn new(timeline: PlaybackTimeline, ticker: T) -> Self {
        Self { timeline, ticker }
    }

    /// Runs the whole replay. Ends with [`PlaybackEvent::Finished`] once
    /// every frame has been pushed and paced; returns early if the sink
    /// stops accepting events.
    pub async fn replay<S: ChartSink>(mut self, sink: &mut S) -> Result<(), ReplayError> {
        debug!("replaying {} frames", self.timeline.len());
        for frame in self.timeline.frames() {
            let x_ms = frame.timestamp.timestamp_millis();
            for sample in &frame.samples {
                match sample.value {
                    Some(value) => sink.on_event(PlaybackEvent::Point {
                        product: sample.product,
                        x_ms,
                        value,
                    })?,
                    None => {
                        warn!(
                            "missing or invalid data for {} at {}",
                            sample.product, frame.timestamp
                        );
                        sink.on_event(PlaybackEvent::Skip {
                            product: sample.product,
                            timestamp: frame.timestamp,
                        })?;
                    }
                }
            }
            self.ticker.tick().await;
        }
        sink.on_event(PlaybackEvent::Finished)
    }
}
