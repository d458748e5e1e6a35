//! LED task modes.

use core::fmt;

/// Behaviour selected for the LED outputs.
///
/// Unknown names are kept verbatim in [`Mode::Unrecognised`] and behave
/// exactly like [`Mode::Command`]: both ticks do nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Outputs only change through explicit LED writes.
    #[default]
    Command,
    /// Three random LED writes per fast tick.
    Rave,
    /// Fixed 39-tick traffic light cycle.
    Traffic,
    /// Slow tick lights one LED according to the temperature bounds.
    Thermometer,
    /// Any other name.  Accepted, stored, and treated as a no-op.
    Unrecognised(String),
}

impl Mode {
    pub fn from_name(name: &str) -> Self {
        match name {
            "command" => Self::Command,
            "rave" => Self::Rave,
            "traffic" => Self::Traffic,
            "thermometer" => Self::Thermometer,
            other => Self::Unrecognised(other.to_owned()),
        }
    }

    /// Name as reported through the parameter tree.
    pub fn name(&self) -> &str {
        match self {
            Self::Command => "command",
            Self::Rave => "rave",
            Self::Traffic => "traffic",
            Self::Thermometer => "thermometer",
            Self::Unrecognised(name) => name,
        }
    }

    pub fn is_recognised(&self) -> bool {
        !matches!(self, Self::Unrecognised(_))
    }
}

impl From<&str> for Mode {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
