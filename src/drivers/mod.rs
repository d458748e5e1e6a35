//! Peripheral drivers for the LED/thermocouple board.
//!
//! Both are generic over the `embedded-hal` 1.0 bus traits and implement
//! the matching port directly.

pub mod max31856;
pub mod mcp23008;

pub use max31856::Max31856;
pub use mcp23008::Mcp23008;
