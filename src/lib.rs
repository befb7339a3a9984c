mod config;
mod coops;
mod error;
mod replay;
mod run;
mod types;

pub mod tui;

pub use error::TidelapseError;
pub use run::run;

pub use config::{ApiTimeZone, Datum, FetchConfig, Units};

pub use coops::client::{CoopsClient, DEFAULT_BASE_URL};
pub use coops::error::FetchError;

pub use types::dataset::{Dataset, EmptyDatasetError};
pub use types::observation::{Observation, ProductSeries};
pub use types::product::Product;
pub use types::time_range::TimeRange;

pub use replay::chart::{
    AxisBand, ChannelSink, ChartSink, ChartSpec, PlaybackEvent, AXIS_STACK_MARGIN,
};
pub use replay::error::ReplayError;
pub use replay::player::Player;
pub use replay::ticker::{IntervalTicker, Ticker};
pub use replay::timeline::{Frame, PlaybackTimeline, Sample};
