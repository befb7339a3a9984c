//! The pacing seam of the replay loop. Production sleeps; tests tick
//! synchronously so a full replay runs in microseconds.

use std::time::Duration;

use async_trait::async_trait;

/// Yields one tick per playback step.
///
/// The player awaits one tick after every frame it pushes, so whatever
/// implements this decides the replay speed.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self);
}

/// Production ticker: one tokio sleep per tick.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTicker {
    period: Duration,
}

impl IntervalTicker {
    /// The stock replay pace, roughly 33 frames per second.
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(30);

    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        tokio::time::sleep(self.period).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_period_is_thirty_milliseconds() {
        assert_eq!(IntervalTicker::default().period(), Duration::from_millis(30));
        assert_eq!(
            IntervalTicker::new(Duration::from_millis(5)).period(),
            Duration::from_millis(5)
        );
    }

    #[tokio::test]
    async fn tick_waits_at_least_one_period() {
        let mut ticker = IntervalTicker::new(Duration::from_millis(10));
        let before = std::time::Instant::now();
        ticker.tick().await;
        assert!(before.elapsed() >= Duration::from_millis(10));
    }
}
