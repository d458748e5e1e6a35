//! Mode controller: the LED state machine.
//!
//! The mode is the discriminant; each timer tick dispatches on it:
//!
//! ```text
//!                 fast tick (LED task)        slow tick (temperature task)
//!  command        -                           -
//!  rave           3 random writes, count+1    -
//!  traffic        sequencer step              -
//!  thermometer    -                           all off, then one indicator
//!  <unknown>      -                           -
//! ```
//!
//! The controller owns the level mirror.  Every output change goes through
//! [`ModeController::drive`], which only updates the mirror once the port
//! accepted the write, so the mirror always reflects the last level the
//! hardware was successfully commanded to.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::bounds::{Bound, TemperatureBounds};
use super::mode::Mode;
use super::traffic::TrafficSequencer;
use crate::app::outputs::{Level, OutputChannel};
use crate::app::ports::OutputPort;
use crate::error::Result;

/// Random writes issued per rave tick.
pub const RAVE_WRITES_PER_TICK: usize = 3;

pub struct ModeController {
    mode: Mode,
    levels: [Level; OutputChannel::COUNT],
    rave_count: u64,
    traffic: TrafficSequencer,
    bounds: TemperatureBounds,
    rng: StdRng,
}

impl ModeController {
    /// Start in command mode with all mirrored levels low.
    ///
    /// `seed` makes rave mode reproducible; `None` seeds from the OS.
    pub fn new(bounds: TemperatureBounds, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        debug!("LED mode set to default: {}", Mode::Command);
        Self {
            mode: Mode::Command,
            levels: [Level::Low; OutputChannel::COUNT],
            rave_count: 0,
            traffic: TrafficSequencer::new(),
            bounds,
            rng,
        }
    }

    // ── Tick entry points ─────────────────────────────────────

    /// LED task tick.
    pub fn on_fast_tick(&mut self, out: &mut impl OutputPort) -> Result<()> {
        match self.mode {
            Mode::Rave => {
                for _ in 0..RAVE_WRITES_PER_TICK {
                    let channel = OutputChannel::ALL[self.rng.random_range(0..OutputChannel::COUNT)];
                    let level = Level::from(self.rng.random_bool(0.5));
                    self.drive(channel, level, out)?;
                }
                self.rave_count += 1;
            }
            Mode::Traffic => {
                for &(channel, level) in self.traffic.advance() {
                    self.drive(channel, level, out)?;
                }
            }
            Mode::Command | Mode::Thermometer | Mode::Unrecognised(_) => {}
        }
        Ok(())
    }

    /// Temperature task tick, fed the raw (not averaged) reading.
    pub fn on_slow_tick(&mut self, temperature: f64, out: &mut impl OutputPort) -> Result<()> {
        if self.mode != Mode::Thermometer {
            return Ok(());
        }
        for channel in OutputChannel::ALL {
            self.drive(channel, Level::Low, out)?;
        }
        if let Some(indicator) = self.bounds.indicator(temperature) {
            self.drive(indicator, Level::High, out)?;
        }
        Ok(())
    }

    // ── Commands ──────────────────────────────────────────────

    /// Switch mode.  Outputs are left exactly as they are.
    pub fn set_mode(&mut self, name: &str) {
        debug!("setting task mode to {}", name);
        let mode = Mode::from_name(name);
        if !mode.is_recognised() {
            warn!("unrecognised task mode '{}', LED outputs will idle", name);
        }
        self.mode = mode;
    }

    /// Explicit LED write, independent of the active mode.
    pub fn set_level(
        &mut self,
        channel: OutputChannel,
        level: Level,
        out: &mut impl OutputPort,
    ) -> Result<()> {
        info!("Setting LED {} state to {}", channel, level.as_u8());
        self.drive(channel, level, out)
    }

    /// Drive every channel low.
    pub fn all_off(&mut self, out: &mut impl OutputPort) -> Result<()> {
        for channel in OutputChannel::ALL {
            self.drive(channel, Level::Low, out)?;
        }
        Ok(())
    }

    pub fn set_bound(&mut self, which: Bound, value: f64) {
        self.bounds.set(which, value);
        info!("{} bound set to {}", which.label(), value);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn level(&self, channel: OutputChannel) -> Level {
        self.levels[channel.index()]
    }

    pub fn bounds(&self) -> TemperatureBounds {
        self.bounds
    }

    /// Rave ticks completed.  Never reset.
    pub fn rave_count(&self) -> u64 {
        self.rave_count
    }

    /// Completed traffic cycles.
    pub fn traffic_loops(&self) -> u64 {
        self.traffic.loops()
    }

    pub fn traffic_phase(&self) -> u32 {
        self.traffic.phase()
    }

    // ── Internal ──────────────────────────────────────────────

    fn drive(
        &mut self,
        channel: OutputChannel,
        level: Level,
        out: &mut impl OutputPort,
    ) -> Result<()> {
        out.set_output(channel, level)?;
        self.levels[channel.index()] = level;
        Ok(())
    }
}
