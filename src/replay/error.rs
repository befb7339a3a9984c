use thiserror::Error;

/// A replay failure. There is only one way a replay can fail: the chart it
/// feeds stopped listening (the dashboard was closed mid-replay).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("Chart sink closed before playback finished")]
    SinkClosed,
}
