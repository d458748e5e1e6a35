//! ledtherm library.
//!
//! A timer-driven LED controller (command, rave, traffic-light and
//! thermometer modes) with a rolling-average thermocouple sampler, all
//! exposed through a hierarchical get/set parameter tree.  Hardware is
//! reached only through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod params;
pub mod pins;
pub mod scheduler;
pub mod sensors;

mod error;

pub use error::{DeviceError, Error, Result};
