//! Linux bus adapter: the real rig on i2c-dev and spidev.
//!
//! Opens the expander and the thermocouple converter through
//! `linux-embedded-hal`, runs each driver's `init`, and hands back a
//! [`HardwareAdapter`] the service can be built over.
//!
//! ```text
//!  /dev/i2c-2      ──▶ I2cdev      ──▶ Mcp23008  ─┐
//!                                                 ├─▶ HardwareAdapter
//!  /dev/spidev0.0  ──▶ SpidevDevice ──▶ Max31856 ─┘
//! ```

use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{I2cdev, SpidevDevice};
use log::info;

use super::hardware::HardwareAdapter;
use crate::drivers::{Max31856, Mcp23008};
use crate::error::{Error, Result};
use crate::pins;

pub type LinuxBoard = HardwareAdapter<Mcp23008<I2cdev>, Max31856<SpidevDevice>>;

/// Open both buses and initialise both chips.  LED pins end up as
/// outputs driven low; the converter is left auto-converting.
pub fn open_board(i2c_device: &str, spi_device: &str) -> Result<LinuxBoard> {
    let i2c = I2cdev::new(i2c_device).map_err(|e| open_error(i2c_device, &e))?;
    let mut outputs = Mcp23008::new(i2c, pins::EXPANDER_I2C_ADDRESS);
    outputs.init()?;

    let mut spi = SpidevDevice::open(spi_device).map_err(|e| open_error(spi_device, &e))?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(pins::THERMOCOUPLE_SPI_HZ)
        .mode(SpiModeFlags::SPI_MODE_1)
        .build();
    spi.configure(&options)
        .map_err(|e| open_error(spi_device, &e))?;
    let mut sensor = Max31856::new(spi);
    sensor.init()?;

    info!(
        "board ready: MCP23008@0x{:02x} on {}, MAX31856 on {}",
        pins::EXPANDER_I2C_ADDRESS,
        i2c_device,
        spi_device
    );
    Ok(HardwareAdapter::new(outputs, sensor))
}

fn open_error(device: &str, e: &dyn std::fmt::Display) -> Error {
    Error::Open {
        device: device.to_owned(),
        reason: e.to_string(),
    }
}
