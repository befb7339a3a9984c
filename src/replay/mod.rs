pub mod chart;
pub mod error;
pub mod player;
pub mod ticker;
pub mod timeline;
