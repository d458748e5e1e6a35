//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the parameter tree and the [`AppContext`] it
//! operates on.  It exposes a clean, hardware-agnostic API: the host loop
//! calls [`poll`](AppService::poll) to run due tasks, and the front-end
//! calls [`get`](AppService::get) / [`set`](AppService::set).  All I/O
//! flows through the port traits the context was built with, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  TemperaturePort ──▶ ┌─────────────────────────────┐
//!                      │         AppService           │ ◀── get / set
//!     OutputPort   ◀── │ Scheduler · Controller · Avg │
//!                      └─────────────────────────────┘
//! ```

use core::time::Duration;

use log::info;
use serde_json::Value;

use crate::config::SystemConfig;
use crate::error::Result;
use crate::params::ParameterTree;
use crate::scheduler::TaskId;

use super::context::AppContext;
use super::ports::{OutputPort, TemperaturePort, TimePort};
use super::tree::build_parameter_tree;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService<H, T> {
    tree: ParameterTree<AppContext<H, T>>,
    ctx: AppContext<H, T>,
    /// Start the LED task from [`start`](Self::start).
    led_autostart: bool,
}

impl<H, T> AppService<H, T>
where
    H: OutputPort + TemperaturePort,
    T: TimePort,
{
    /// Construct the service and drive every output low.
    ///
    /// Does **not** start the tasks; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig, hw: H, clock: T) -> Result<Self> {
        config.validate()?;
        let mut ctx = AppContext::new(config, hw, clock)?;
        ctx.controller.all_off(&mut ctx.hw)?;
        Ok(Self {
            tree: build_parameter_tree(),
            ctx,
            led_autostart: config.led_task_enable,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the tasks enabled in the configuration.
    pub fn start(&mut self) {
        let now = self.ctx.clock.now();
        if self.led_autostart {
            self.ctx.scheduler.start(TaskId::Led, now);
        }
        if self.ctx.temp_task_enable {
            self.ctx.scheduler.start(TaskId::Temperature, now);
        }
        info!(
            "AppService started in {} mode (led task: {}, temperature task: {})",
            self.ctx.controller.mode(),
            self.led_autostart,
            self.ctx.temp_task_enable
        );
    }

    /// Stop both tasks.  Outputs keep their last level.
    pub fn cleanup(&mut self) {
        self.ctx.scheduler.stop(TaskId::Led);
        self.ctx.scheduler.stop(TaskId::Temperature);
        info!("AppService stopped");
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run every task due now.
    pub fn poll(&mut self) -> Result<()> {
        let now = self.ctx.clock.now();
        self.poll_at(now)
    }

    /// Run every task due at `now`, in deadline order.
    ///
    /// A failing task does not keep the other from running; the first
    /// error is returned once both had their turn.
    pub fn poll_at(&mut self, now: Duration) -> Result<()> {
        let mut first_err = None;
        for task in self.ctx.scheduler.due_tasks(now) {
            let outcome = match task {
                TaskId::Led => self.ctx.run_led_task(),
                TaskId::Temperature => self.ctx.run_temperature_task(),
            };
            if let Err(e) = outcome {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    /// Earliest time [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.ctx.scheduler.next_deadline()
    }

    // ── Parameter access ──────────────────────────────────────

    pub fn get(&self, path: &str) -> Result<Value> {
        self.tree.get(&self.ctx, path)
    }

    pub fn set(&mut self, path: &str, value: &Value) -> Result<()> {
        self.tree.set(&mut self.ctx, path, value)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn context(&self) -> &AppContext<H, T> {
        &self.ctx
    }

    pub fn hardware(&self) -> &H {
        &self.ctx.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.ctx.hw
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
