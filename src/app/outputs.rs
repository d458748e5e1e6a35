//! Output channel identities and logic levels.

use core::fmt;

use crate::pins;

/// One of the three indicator LEDs on the output bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputChannel {
    Red,
    Yellow,
    Green,
}

impl OutputChannel {
    /// Number of channels; sizes the level mirror.
    pub const COUNT: usize = 3;

    /// Every channel, in the order thermometer mode clears them.
    pub const ALL: [OutputChannel; Self::COUNT] = [Self::Red, Self::Yellow, Self::Green];

    /// Expander pin index this channel is wired to.
    pub const fn pin(self) -> u8 {
        match self {
            Self::Red => pins::LED_RED_PIN,
            Self::Yellow => pins::LED_YELLOW_PIN,
            Self::Green => pins::LED_GREEN_PIN,
        }
    }

    /// Index into a `[_; COUNT]` mirror array (same as the pin index).
    pub const fn index(self) -> usize {
        self.pin() as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pin {})", self.name(), self.pin())
    }
}

/// Digital output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Level {
    #[default]
    Low = 0,
    High = 1,
}

impl Level {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl From<bool> for Level {
    fn from(on: bool) -> Self {
        if on { Self::High } else { Self::Low }
    }
}
