//! LED control logic: modes, the traffic sequencer, thermometer bounds,
//! and the [`ModeController`](controller::ModeController) that ties them
//! to the output bank.

pub mod bounds;
pub mod controller;
pub mod mode;
pub mod traffic;
