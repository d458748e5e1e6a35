//! Periodic task scheduler.
//!
//! Two fixed tasks share the control loop: the LED task (mode-controller
//! fast tick, configurable period) and the temperature task (sensor read
//! plus slow tick, fixed 1 s).  The scheduler only keeps deadlines; it
//! never calls into the application.  The host loop asks
//! [`Scheduler::due_tasks`] which tasks to run and sleeps until
//! [`Scheduler::next_deadline`] in between.
//!
//! ```text
//!   start(now) ──► next_due = now + period
//!                        │
//!   poll(now >= due) ────┤ fire, next_due += period × (missed + 1)
//!                        │
//!   stop() ──────────────┴──► next_due = None   (never fires again)
//! ```
//!
//! A loop that falls behind skips the fires it missed instead of
//! replaying them back to back.  A deadline past the end of the clock
//! saturates at `Duration::MAX`, so the task stays armed but never fires.

use core::time::Duration;

use heapless::Vec;
use log::debug;

use crate::error::{Error, Result};

/// Parameter path reported when an LED period is rejected.
const LED_INTERVAL_PATH: &str = "led_task/interval";

/// Fixed period of the temperature task.
pub const TEMPERATURE_PERIOD: Duration = Duration::from_secs(1);

/// Convert a user-supplied period in seconds, rejecting anything that is
/// not a finite, strictly positive, representable duration.
pub fn period_from_secs(path: &str, secs: f64) -> Result<Duration> {
    if !(secs.is_finite() && secs > 0.0) {
        return Err(Error::invalid(path, "must be a positive number of seconds"));
    }
    match Duration::try_from_secs_f64(secs) {
        Ok(period) if !period.is_zero() => Ok(period),
        Ok(_) => Err(Error::invalid(path, "below timer resolution")),
        Err(_) => Err(Error::invalid(path, "out of range")),
    }
}

fn check_period(period: Duration) -> Result<()> {
    if period.is_zero() {
        return Err(Error::invalid(LED_INTERVAL_PATH, "must be non-zero"));
    }
    Ok(())
}

/// The two tasks driven by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    Led,
    Temperature,
}

impl TaskId {
    pub const ALL: [TaskId; 2] = [TaskId::Led, TaskId::Temperature];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Led => "led",
            Self::Temperature => "temperature",
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Single periodic task
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
struct PeriodicTask {
    period: Duration,
    /// `None` while stopped.
    next_due: Option<Duration>,
}

impl PeriodicTask {
    const fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    fn start(&mut self, now: Duration) {
        self.next_due = Some(now.saturating_add(self.period));
    }

    fn stop(&mut self) {
        self.next_due = None;
    }

    fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consume one fire if due, advancing the deadline past `now`.
    fn take_due(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let behind = now - due;
        let periods = behind.as_nanos() / self.period.as_nanos() + 1;
        let skip = u32::try_from(periods).unwrap_or(u32::MAX);
        self.next_due = Some(due.saturating_add(self.period.saturating_mul(skip)));
        true
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

pub struct Scheduler {
    led: PeriodicTask,
    temperature: PeriodicTask,
}

impl Scheduler {
    /// Both tasks start stopped.  A zero `led_period` is rejected.
    pub fn new(led_period: Duration) -> Result<Self> {
        check_period(led_period)?;
        Ok(Self {
            led: PeriodicTask::new(led_period),
            temperature: PeriodicTask::new(TEMPERATURE_PERIOD),
        })
    }

    fn task(&self, id: TaskId) -> &PeriodicTask {
        match id {
            TaskId::Led => &self.led,
            TaskId::Temperature => &self.temperature,
        }
    }

    fn task_mut(&mut self, id: TaskId) -> &mut PeriodicTask {
        match id {
            TaskId::Led => &mut self.led,
            TaskId::Temperature => &mut self.temperature,
        }
    }

    /// (Re)arm `id`; the first fire is one period after `now`.
    pub fn start(&mut self, id: TaskId, now: Duration) {
        let task = self.task_mut(id);
        task.start(now);
        debug!("{} task started (every {:?})", id.label(), task.period);
    }

    pub fn stop(&mut self, id: TaskId) {
        self.task_mut(id).stop();
        debug!("{} task stopped", id.label());
    }

    pub fn is_running(&self, id: TaskId) -> bool {
        self.task(id).is_running()
    }

    pub fn period(&self, id: TaskId) -> Duration {
        self.task(id).period
    }

    /// Change the LED period.  A running task is stopped and restarted
    /// so the new period counts from `now`.
    pub fn set_led_period(&mut self, period: Duration, now: Duration) -> Result<()> {
        check_period(period)?;
        let was_running = self.led.is_running();
        if was_running {
            self.stop(TaskId::Led);
        }
        self.led.period = period;
        debug!("led task interval set to {:?}", period);
        if was_running {
            self.start(TaskId::Led, now);
        }
        Ok(())
    }

    /// Tasks due at `now`, in deadline order (LED first on ties).
    /// Each returned task has its deadline advanced.
    pub fn due_tasks(&mut self, now: Duration) -> Vec<TaskId, 2> {
        let mut due: Vec<(Duration, TaskId), 2> = Vec::new();
        for id in TaskId::ALL {
            let task = self.task_mut(id);
            if let Some(deadline) = task.next_due {
                if task.take_due(now) {
                    // At most one entry per task, capacity is exact.
                    due.push((deadline, id))
                        .unwrap_or_else(|_| unreachable!("more due tasks than TaskId::ALL"));
                }
            }
        }
        if due.len() == 2 && due[1].0 < due[0].0 {
            due.swap(0, 1);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Earliest pending deadline, or `None` when both tasks are stopped.
    pub fn next_deadline(&self) -> Option<Duration> {
        TaskId::ALL
            .into_iter()
            .filter_map(|id| self.task(id).next_due)
            .min()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
