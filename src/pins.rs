//! Board wiring for the LED / thermocouple demo rig.
//!
//! Single source of truth: drivers and the output channel map reference
//! this module rather than hard-coding addresses or pin numbers.

// ---------------------------------------------------------------------------
// MCP23008 GPIO expander (I2C)
// ---------------------------------------------------------------------------

/// Linux i2c-dev node of the bus the expander sits on (bus 2).
pub const EXPANDER_I2C_DEVICE: &str = "/dev/i2c-2";
/// 7-bit I2C address (A2..A0 strapped low).
pub const EXPANDER_I2C_ADDRESS: u8 = 0x20;

/// Expander pin driving the green LED.
pub const LED_GREEN_PIN: u8 = 0;
/// Expander pin driving the yellow LED.
pub const LED_YELLOW_PIN: u8 = 1;
/// Expander pin driving the red LED.
pub const LED_RED_PIN: u8 = 2;

/// Number of expander pins configured as LED outputs.
pub const LED_PIN_COUNT: u8 = 3;

// ---------------------------------------------------------------------------
// MAX31856 thermocouple converter (SPI)
// ---------------------------------------------------------------------------

/// Linux spidev node, chip select handled by the kernel.
pub const THERMOCOUPLE_SPI_DEVICE: &str = "/dev/spidev0.0";
/// SCLK rate; the converter tops out at 5 MHz.
pub const THERMOCOUPLE_SPI_HZ: u32 = 1_000_000;
