pub mod dataset;
pub mod observation;
pub mod product;
pub mod time_range;
