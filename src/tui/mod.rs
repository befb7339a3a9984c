//! Terminal dashboard for the replay: a stack of per-product line charts
//! over one shared time axis, updated live from the playback channel.

mod app;
mod chart;
mod ui;

pub use app::run;
pub use chart::{BandState, ChartState};
