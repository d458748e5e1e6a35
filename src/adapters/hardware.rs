//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the output-bank driver and the temperature driver and exposes
//! them as one value implementing both [`OutputPort`] and
//! [`TemperaturePort`], which is what [`AppService`] is built over.
//!
//! [`AppService`]: crate::app::service::AppService

use crate::app::outputs::{Level, OutputChannel};
use crate::app::ports::{OutputPort, TemperaturePort};
use crate::error::DeviceError;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<O, S> {
    outputs: O,
    sensor: S,
}

impl<O, S> HardwareAdapter<O, S> {
    pub fn new(outputs: O, sensor: S) -> Self {
        Self { outputs, sensor }
    }

    pub fn into_parts(self) -> (O, S) {
        (self.outputs, self.sensor)
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<O: OutputPort, S> OutputPort for HardwareAdapter<O, S> {
    fn set_output(&mut self, channel: OutputChannel, level: Level) -> Result<(), DeviceError> {
        self.outputs.set_output(channel, level)
    }
}

// ── TemperaturePort implementation ────────────────────────────

impl<O, S: TemperaturePort> TemperaturePort for HardwareAdapter<O, S> {
    fn read_temperature(&mut self) -> Result<f64, DeviceError> {
        self.sensor.read_temperature()
    }
}
