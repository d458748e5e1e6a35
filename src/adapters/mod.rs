//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                  |
//! |------------|--------------------|------------------------------|
//! | `hardware` | OutputPort         | MCP23008 (or any bank)       |
//! |            | TemperaturePort    | MAX31856 (or any sensor)     |
//! | `linux`    | (builds hardware)  | /dev/i2c-*, /dev/spidev*     |
//! | `sim`      | OutputPort         | in-memory levels             |
//! |            | TemperaturePort    | random-walk thermocouple     |
//! | `time`     | TimePort           | `std::time::Instant`         |
//! | `console`  | -                  | stdin/stdout command channel |

pub mod console;
pub mod hardware;
#[cfg(target_os = "linux")]
pub mod linux;
pub mod sim;
pub mod time;
