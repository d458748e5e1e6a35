//! System configuration parameters
//!
//! Start-up options for the controller.  Every field has a default, so
//! a config file only needs to name what it changes.  Runtime changes go
//! through the parameter tree and are not written back.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::control::bounds::TemperatureBounds;
use crate::error::{Error, Result};
use crate::pins;
use crate::scheduler::period_from_secs;

/// Which board the host binary drives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardConfig {
    /// In-memory outputs and a drifting thermocouple.
    #[default]
    Simulated,
    /// MCP23008 on an i2c-dev node and MAX31856 on a spidev node.
    Linux {
        #[serde(default = "default_i2c_device")]
        i2c_device: String,
        #[serde(default = "default_spi_device")]
        spi_device: String,
    },
}

fn default_i2c_device() -> String {
    pins::EXPANDER_I2C_DEVICE.to_owned()
}

fn default_spi_device() -> String {
    pins::THERMOCOUPLE_SPI_DEVICE.to_owned()
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- LED task ---
    /// Start the LED task on boot
    pub led_task_enable: bool,
    /// LED task period (seconds, > 0)
    pub led_task_interval_secs: f64,

    // --- Temperature task ---
    /// Start the 1 Hz temperature task on boot
    pub temp_task_enable: bool,
    /// Thermometer mode: below this lights yellow (°C)
    pub temp_lower_bound_c: f64,
    /// Thermometer mode: above this lights red (°C)
    pub temp_upper_bound_c: f64,

    // --- Rave ---
    /// Fixed PRNG seed for reproducible rave patterns; `None` seeds from the OS
    pub rave_seed: Option<u64>,

    // --- Hardware ---
    /// Board selection for the host binary
    pub board: BoardConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let bounds = TemperatureBounds::default();
        Self {
            led_task_enable: true,
            led_task_interval_secs: 0.25, // 4 Hz

            temp_task_enable: true,
            temp_lower_bound_c: bounds.lower,
            temp_upper_bound_c: bounds.upper,

            rave_seed: None,

            board: BoardConfig::Simulated,
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::MalformedInput(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.led_period().map(|_| ())
    }

    /// LED task period as a [`Duration`].
    pub fn led_period(&self) -> Result<Duration> {
        period_from_secs("led_task_interval_secs", self.led_task_interval_secs)
    }

    pub fn bounds(&self) -> TemperatureBounds {
        TemperatureBounds::new(self.temp_lower_bound_c, self.temp_upper_bound_c)
    }
}
