//! MAX31856 thermocouple-to-digital converter.
//!
//! Runs in automatic conversion mode with a type-K thermocouple, so a
//! read is just a burst of the three linearized-temperature registers
//! plus the fault status register that follows them.
//!
//! Register access: the first byte on the wire is the register address,
//! with bit 7 set for writes.  Reads auto-increment.

use embedded_hal::spi::{Error as _, Operation, SpiDevice};
use log::debug;

use crate::app::ports::TemperaturePort;
use crate::error::DeviceError;

const REG_CR0: u8 = 0x00;
const REG_CR1: u8 = 0x01;
/// Linearized TC temperature, high byte.  MID, LOW and SR follow.
const REG_LTCBH: u8 = 0x0C;

const WRITE_FLAG: u8 = 0x80;

/// CR0: automatic conversion every ~100 ms.
const CR0_AUTO_CONVERT: u8 = 0x80;
/// CR0: open-circuit detection, mode 1.
const CR0_OCFAULT0: u8 = 0x10;
/// CR1: single-sample averaging, type K.
const CR1_TYPE_K: u8 = 0x03;

/// Status bits that make a reading meaningless: cold-junction and
/// thermocouple out of range, over/under voltage, open circuit.
const SR_FAULT_MASK: u8 = 0b1100_0011;

/// °C per LSB of the 19-bit linearized temperature.
const LSB_CELSIUS: f64 = 0.0078125;

pub struct Max31856<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Max31856<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Select type K and start continuous conversion.
    pub fn init(&mut self) -> Result<(), DeviceError> {
        self.write_register(REG_CR1, CR1_TYPE_K)?;
        self.write_register(REG_CR0, CR0_AUTO_CONVERT | CR0_OCFAULT0)?;
        debug!("MAX31856: type K, auto-convert");
        Ok(())
    }

    /// Latest conversion in °C, or the latched fault status.
    pub fn read_celsius(&mut self) -> Result<f64, DeviceError> {
        let mut buf = [0u8; 4];
        self.spi
            .transaction(&mut [Operation::Write(&[REG_LTCBH]), Operation::Read(&mut buf)])
            .map_err(|e| DeviceError::Spi(e.kind()))?;

        let status = buf[3];
        if status & SR_FAULT_MASK != 0 {
            return Err(DeviceError::ThermocoupleFault(status));
        }
        Ok(decode_temperature([buf[0], buf[1], buf[2]]))
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), DeviceError> {
        self.spi
            .write(&[reg | WRITE_FLAG, value])
            .map_err(|e| DeviceError::Spi(e.kind()))
    }
}

impl<SPI: SpiDevice> TemperaturePort for Max31856<SPI> {
    fn read_temperature(&mut self) -> Result<f64, DeviceError> {
        self.read_celsius()
    }
}

/// LTCBH:LTCBM:LTCBL hold a left-aligned, two's-complement 19-bit value.
fn decode_temperature(raw: [u8; 3]) -> f64 {
    // Arithmetic shift sign-extends from bit 31.
    let counts = i32::from_be_bytes([raw[0], raw[1], raw[2], 0]) >> 13;
    f64::from(counts) * LSB_CELSIUS
}
