//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the GPIO expander, the thermocouple converter, the
//! simulated board, test mocks) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches a bus directly.

use core::time::Duration;

use super::outputs::{Level, OutputChannel};
use crate::error::DeviceError;

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive an LED.
pub trait OutputPort {
    /// Drive `channel` to `level`.  Returns once the write has been issued.
    fn set_output(&mut self, channel: OutputChannel, level: Level) -> Result<(), DeviceError>;
}

// ───────────────────────────────────────────────────────────────
// Temperature port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per temperature tick.
///
/// May block for the duration of a bus transaction.
pub trait TemperaturePort {
    /// Latest thermocouple temperature in degrees Celsius.
    fn read_temperature(&mut self) -> Result<f64, DeviceError>;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic clock used by the scheduler and the uptime parameter.
pub trait TimePort {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;
}
