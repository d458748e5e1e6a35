//! Temperature sampling.
//!
//! The sensor itself sits behind [`TemperaturePort`](crate::app::ports::TemperaturePort);
//! this module only holds the processing applied to its readings.

pub mod rolling;

pub use rolling::RollingAverage;
