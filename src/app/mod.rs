//! Application core: pure domain logic, zero I/O.
//!
//! This module wires the mode controller, the temperature sampler and the
//! scheduler into one [`AppService`](service::AppService) and exposes
//! them through the parameter tree.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod context;
pub mod outputs;
pub mod ports;
pub mod service;
pub mod tree;
