//! Traffic light sequencer.
//!
//! A phase counter advanced once per LED tick.  Output changes happen at
//! fixed phase values only; every other tick leaves the lights alone.
//! Timing is tick-count based, so the cycle length in seconds scales
//! with the LED task interval (39 ticks ≈ 9.75 s at the default 0.25 s).
//!
//! ```text
//!  phase   2 : yellow off, red on          (red)
//!  phase  14 : yellow on                   (red + yellow)
//!  phase  22 : red off, yellow off, green  (green)
//!  phase  34 : green off, yellow on        (yellow)
//!  phase  39 : back to 0, loop counter + 1
//! ```

use crate::app::outputs::{Level, OutputChannel};

/// A single output change.
pub type Step = (OutputChannel, Level);

/// Phase at which the cycle wraps back to zero.
pub const CYCLE_TICKS: u32 = 39;

/// Phase → output changes, applied in order.
const TRANSITIONS: [(u32, &[Step]); 4] = [
    (
        2,
        &[
            (OutputChannel::Yellow, Level::Low),
            (OutputChannel::Red, Level::High),
        ],
    ),
    (14, &[(OutputChannel::Yellow, Level::High)]),
    (
        22,
        &[
            (OutputChannel::Red, Level::Low),
            (OutputChannel::Yellow, Level::Low),
            (OutputChannel::Green, Level::High),
        ],
    ),
    (
        34,
        &[
            (OutputChannel::Green, Level::Low),
            (OutputChannel::Yellow, Level::High),
        ],
    ),
];

#[derive(Debug, Clone, Default)]
pub struct TrafficSequencer {
    phase: u32,
    loops: u64,
}

impl TrafficSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick and return the output changes due at the new phase.
    pub fn advance(&mut self) -> &'static [Step] {
        self.phase += 1;
        if self.phase >= CYCLE_TICKS {
            self.phase = 0;
            self.loops += 1;
            return &[];
        }
        match TRANSITIONS.iter().find(|(at, _)| *at == self.phase) {
            Some(&(_, steps)) => steps,
            None => &[],
        }
    }

    /// Position inside the current cycle (0..=38).
    pub fn phase(&self) -> u32 {
        self.phase
    }

    /// Completed cycles since startup.
    pub fn loops(&self) -> u64 {
        self.loops
    }
}
