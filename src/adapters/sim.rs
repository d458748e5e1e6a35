//! Simulated board for host runs.
//!
//! Stands in for the expander and thermocouple when no buses are
//! attached: outputs are kept in memory and logged, and the temperature
//! performs a bounded random walk around a set point.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::app::outputs::{Level, OutputChannel};
use crate::app::ports::{OutputPort, TemperaturePort};
use crate::error::DeviceError;

/// Largest change between two consecutive readings (°C).
const MAX_STEP_C: f64 = 0.15;
/// How far the walk may wander from the set point (°C).
const MAX_DRIFT_C: f64 = 1.5;

pub struct SimulatedBoard {
    levels: [Level; OutputChannel::COUNT],
    set_point: f64,
    temperature: f64,
    rng: StdRng,
}

impl SimulatedBoard {
    pub fn new(set_point: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            levels: [Level::Low; OutputChannel::COUNT],
            set_point,
            temperature: set_point,
            rng,
        }
    }

    pub fn level(&self, channel: OutputChannel) -> Level {
        self.levels[channel.index()]
    }
}

impl OutputPort for SimulatedBoard {
    fn set_output(&mut self, channel: OutputChannel, level: Level) -> Result<(), DeviceError> {
        trace!("sim: {} -> {}", channel, level.as_u8());
        self.levels[channel.index()] = level;
        Ok(())
    }
}

impl TemperaturePort for SimulatedBoard {
    fn read_temperature(&mut self) -> Result<f64, DeviceError> {
        let step = self.rng.random_range(-MAX_STEP_C..=MAX_STEP_C);
        self.temperature = (self.temperature + step).clamp(
            self.set_point - MAX_DRIFT_C,
            self.set_point + MAX_DRIFT_C,
        );
        Ok(self.temperature)
    }
}
