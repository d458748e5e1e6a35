//! MCP23008 8-bit I2C GPIO expander driving the LED output bank.
//!
//! Only the output path is used: pins are switched to outputs through
//! IODIR and driven through the output latch (OLAT).  A shadow copy of
//! OLAT is kept so single-pin writes never need a read-back.
//!
//! Generic over any `embedded-hal` 1.0 [`I2c`] bus, so the same driver
//! runs on a Linux i2c-dev adapter or against a mock bus in tests.

use embedded_hal::i2c::{Error as _, I2c};
use log::debug;

use crate::app::outputs::{Level, OutputChannel};
use crate::app::ports::OutputPort;
use crate::error::DeviceError;
use crate::pins;

const REG_IODIR: u8 = 0x00;
const REG_GPIO: u8 = 0x09;
const REG_OLAT: u8 = 0x0A;

pub struct Mcp23008<I2C> {
    i2c: I2C,
    address: u8,
    olat: u8,
}

impl<I2C: I2c> Mcp23008<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            olat: 0,
        }
    }

    /// Configure the LED pins as outputs and drive them low.
    pub fn init(&mut self) -> Result<(), DeviceError> {
        let led_mask = (1u8 << pins::LED_PIN_COUNT) - 1;
        let iodir = self.read_register(REG_IODIR)?;
        self.write_register(REG_IODIR, iodir & !led_mask)?;
        self.olat &= !led_mask;
        self.write_register(REG_OLAT, self.olat)?;
        debug!(
            "MCP23008@0x{:02x}: {} LED pins configured as outputs",
            self.address,
            pins::LED_PIN_COUNT
        );
        Ok(())
    }

    /// Drive a single pin (0..=7).
    pub fn write_pin(&mut self, pin: u8, level: Level) -> Result<(), DeviceError> {
        debug_assert!(pin < 8, "MCP23008 has 8 pins, got {pin}");
        let bit = 1u8 << pin;
        let next = if level.is_high() {
            self.olat | bit
        } else {
            self.olat & !bit
        };
        self.write_register(REG_OLAT, next)?;
        self.olat = next;
        Ok(())
    }

    /// Read the live port state.
    pub fn read_port(&mut self) -> Result<u8, DeviceError> {
        self.read_register(REG_GPIO)
    }

    /// Give back the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), DeviceError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|e| DeviceError::I2c(e.kind()))
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, DeviceError> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|e| DeviceError::I2c(e.kind()))?;
        Ok(buf[0])
    }
}

impl<I2C: I2c> OutputPort for Mcp23008<I2C> {
    fn set_output(&mut self, channel: OutputChannel, level: Level) -> Result<(), DeviceError> {
        self.write_pin(channel.pin(), level)
    }
}
