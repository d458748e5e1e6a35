//! Thermometer-mode temperature thresholds.

use crate::app::outputs::OutputChannel;

/// Which end of the band a write targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

impl Bound {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lower => "Lower",
            Self::Upper => "Upper",
        }
    }
}

/// Comfort band in °C.  No ordering is enforced between the two ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBounds {
    pub lower: f64,
    pub upper: f64,
}

impl Default for TemperatureBounds {
    fn default() -> Self {
        Self {
            lower: 21.5,
            upper: 22.0,
        }
    }
}

impl TemperatureBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn get(&self, which: Bound) -> f64 {
        match which {
            Bound::Lower => self.lower,
            Bound::Upper => self.upper,
        }
    }

    pub fn set(&mut self, which: Bound, value: f64) {
        match which {
            Bound::Lower => self.lower = value,
            Bound::Upper => self.upper = value,
        }
    }

    /// The indicator to light for `temperature`, if any.
    ///
    /// Checked in order: below lower → yellow, strictly inside → green,
    /// above upper → red.  A reading exactly on a bound (or NaN) lights
    /// nothing.
    pub fn indicator(&self, temperature: f64) -> Option<OutputChannel> {
        if temperature < self.lower {
            Some(OutputChannel::Yellow)
        } else if self.lower < temperature && temperature < self.upper {
            Some(OutputChannel::Green)
        } else if temperature > self.upper {
            Some(OutputChannel::Red)
        } else {
            None
        }
    }
}
