//! Shared state threaded through every tick and parameter access.
//!
//! [`AppContext`] owns the hardware, the clock, and all controller state.
//! Task bodies and parameter-tree accessors are written against it, so a
//! single owner serialises every change.

use core::time::Duration;

use log::debug;

use crate::config::SystemConfig;
use crate::control::controller::ModeController;
use crate::error::Result;
use crate::scheduler::{Scheduler, TaskId, period_from_secs};
use crate::sensors::RollingAverage;

use super::ports::{OutputPort, TemperaturePort, TimePort};

pub struct AppContext<H, T> {
    pub(crate) hw: H,
    pub(crate) clock: T,
    pub(crate) controller: ModeController,
    pub(crate) sampler: RollingAverage,
    pub(crate) scheduler: Scheduler,
    /// Raw value of the latest successful reading.
    pub(crate) last_temperature: Option<f64>,
    pub(crate) temp_task_enable: bool,
    started_at: Duration,
}

impl<H, T> AppContext<H, T> {
    pub fn controller(&self) -> &ModeController {
        &self.controller
    }

    pub fn sampler(&self) -> &RollingAverage {
        &self.sampler
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }
}

impl<H, T: TimePort> AppContext<H, T> {
    pub fn new(config: &SystemConfig, hw: H, clock: T) -> Result<Self> {
        let led_period = config.led_period()?;
        let started_at = clock.now();
        Ok(Self {
            hw,
            controller: ModeController::new(config.bounds(), config.rave_seed),
            sampler: RollingAverage::new(),
            scheduler: Scheduler::new(led_period)?,
            last_temperature: None,
            temp_task_enable: config.temp_task_enable,
            started_at,
            clock,
        })
    }

    /// Seconds since construction.
    pub fn uptime_secs(&self) -> f64 {
        self.clock.now().saturating_sub(self.started_at).as_secs_f64()
    }

    /// Start or stop the LED task.  Repeating the current state is a no-op.
    pub fn set_led_task_enable(&mut self, enable: bool) {
        match (enable, self.scheduler.is_running(TaskId::Led)) {
            (true, false) => {
                let now = self.clock.now();
                self.scheduler.start(TaskId::Led, now);
            }
            (false, true) => self.scheduler.stop(TaskId::Led),
            _ => {}
        }
    }

    pub fn led_task_interval_secs(&self) -> f64 {
        self.scheduler.period(TaskId::Led).as_secs_f64()
    }

    /// Change the LED period; a running task restarts on the new period.
    pub fn set_led_task_interval(&mut self, path: &str, secs: f64) -> Result<()> {
        let period = period_from_secs(path, secs)?;
        let now = self.clock.now();
        self.scheduler.set_led_period(period, now)
    }
}

impl<H: OutputPort + TemperaturePort, T: TimePort> AppContext<H, T> {
    /// LED task body.
    pub fn run_led_task(&mut self) -> Result<()> {
        self.controller.on_fast_tick(&mut self.hw)
    }

    /// Temperature task body: read, average, then let thermometer mode
    /// act on the raw reading.
    pub fn run_temperature_task(&mut self) -> Result<()> {
        let temperature = self.hw.read_temperature()?;
        self.last_temperature = Some(temperature);
        let average = self.sampler.record(temperature);
        debug!(
            "temperature {:.2} °C, rolling avg {:.2} °C ({} samples)",
            temperature,
            average,
            self.sampler.count()
        );
        self.controller.on_slow_tick(temperature, &mut self.hw)
    }
}
