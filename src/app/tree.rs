//! The controller's parameter layout.
//!
//! Built once by [`build_parameter_tree`].  Every accessor is a plain
//! function over [`AppContext`]:
//!
//! ```text
//! version                  ro
//! server_uptime            ro  seconds
//! led_task/
//!   rave_count             ro
//!   traffic_count          ro  completed traffic cycles
//!   traffic_phase          ro
//!   enable                 rw  starts/stops the LED task
//!   task_mode              rw  any string
//!   interval               rw  seconds, > 0
//! leds/
//!   red | yellow | green   rw  0/1
//! temperature/
//!   temperature            ro  last raw reading, null before the first
//!   rolling_avg            ro
//!   temps_counted          ro
//!   task_enable            ro
//!   temp_bounds/
//!     lower | upper        rw
//! ```

use serde_json::{Value, json};

use crate::control::bounds::Bound;
use crate::error::Result;
use crate::params::{ParamNode, ParameterTree, expect_bool, expect_f64, expect_level, expect_str};
use crate::scheduler::TaskId;

use super::context::AppContext;
use super::outputs::OutputChannel;
use super::ports::{OutputPort, TemperaturePort, TimePort};

pub fn build_parameter_tree<H, T>() -> ParameterTree<AppContext<H, T>>
where
    H: OutputPort + TemperaturePort,
    T: TimePort,
{
    ParameterTree::new(ParamNode::branch(vec![
        ("version", ParamNode::read_only(version::<H, T>)),
        ("server_uptime", ParamNode::read_only(server_uptime::<H, T>)),
        (
            "led_task",
            ParamNode::branch(vec![
                ("rave_count", ParamNode::read_only(rave_count::<H, T>)),
                ("traffic_count", ParamNode::read_only(traffic_count::<H, T>)),
                ("traffic_phase", ParamNode::read_only(traffic_phase::<H, T>)),
                (
                    "enable",
                    ParamNode::read_write(led_task_enable::<H, T>, set_led_task_enable::<H, T>),
                ),
                (
                    "task_mode",
                    ParamNode::read_write(task_mode::<H, T>, set_task_mode::<H, T>),
                ),
                (
                    "interval",
                    ParamNode::read_write(led_interval::<H, T>, set_led_interval::<H, T>),
                ),
            ]),
        ),
        (
            "leds",
            ParamNode::branch(vec![
                ("red", ParamNode::read_write(red::<H, T>, set_red::<H, T>)),
                ("yellow", ParamNode::read_write(yellow::<H, T>, set_yellow::<H, T>)),
                ("green", ParamNode::read_write(green::<H, T>, set_green::<H, T>)),
            ]),
        ),
        (
            "temperature",
            ParamNode::branch(vec![
                ("temperature", ParamNode::read_only(temperature::<H, T>)),
                ("rolling_avg", ParamNode::read_only(rolling_avg::<H, T>)),
                ("temps_counted", ParamNode::read_only(temps_counted::<H, T>)),
                ("task_enable", ParamNode::read_only(temp_task_enable::<H, T>)),
                (
                    "temp_bounds",
                    ParamNode::branch(vec![
                        (
                            "lower",
                            ParamNode::read_write(lower_bound::<H, T>, set_lower_bound::<H, T>),
                        ),
                        (
                            "upper",
                            ParamNode::read_write(upper_bound::<H, T>, set_upper_bound::<H, T>),
                        ),
                    ]),
                ),
            ]),
        ),
    ]))
}

// ---------------------------------------------------------------------------
// Top level
// ---------------------------------------------------------------------------

fn version<H, T>(_: &AppContext<H, T>) -> Value {
    json!(env!("CARGO_PKG_VERSION"))
}

fn server_uptime<H, T: TimePort>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.uptime_secs())
}

// ---------------------------------------------------------------------------
// led_task/
// ---------------------------------------------------------------------------

fn rave_count<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.controller.rave_count())
}

fn traffic_count<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.controller.traffic_loops())
}

fn traffic_phase<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.controller.traffic_phase())
}

fn led_task_enable<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.scheduler.is_running(TaskId::Led))
}

fn set_led_task_enable<H, T: TimePort>(
    ctx: &mut AppContext<H, T>,
    path: &str,
    value: &Value,
) -> Result<()> {
    ctx.set_led_task_enable(expect_bool(path, value)?);
    Ok(())
}

fn task_mode<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.controller.mode().name())
}

fn set_task_mode<H, T>(ctx: &mut AppContext<H, T>, path: &str, value: &Value) -> Result<()> {
    ctx.controller.set_mode(expect_str(path, value)?);
    Ok(())
}

fn led_interval<H, T: TimePort>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.led_task_interval_secs())
}

fn set_led_interval<H, T: TimePort>(
    ctx: &mut AppContext<H, T>,
    path: &str,
    value: &Value,
) -> Result<()> {
    let secs = expect_f64(path, value)?;
    ctx.set_led_task_interval(path, secs)
}

// ---------------------------------------------------------------------------
// leds/
// ---------------------------------------------------------------------------

fn led<H, T>(ctx: &AppContext<H, T>, channel: OutputChannel) -> Value {
    json!(ctx.controller.level(channel).as_u8())
}

fn set_led<H: OutputPort, T>(
    ctx: &mut AppContext<H, T>,
    channel: OutputChannel,
    path: &str,
    value: &Value,
) -> Result<()> {
    let level = expect_level(path, value)?;
    ctx.controller.set_level(channel, level, &mut ctx.hw)
}

fn red<H, T>(ctx: &AppContext<H, T>) -> Value {
    led(ctx, OutputChannel::Red)
}

fn yellow<H, T>(ctx: &AppContext<H, T>) -> Value {
    led(ctx, OutputChannel::Yellow)
}

fn green<H, T>(ctx: &AppContext<H, T>) -> Value {
    led(ctx, OutputChannel::Green)
}

fn set_red<H: OutputPort, T>(ctx: &mut AppContext<H, T>, path: &str, value: &Value) -> Result<()> {
    set_led(ctx, OutputChannel::Red, path, value)
}

fn set_yellow<H: OutputPort, T>(
    ctx: &mut AppContext<H, T>,
    path: &str,
    value: &Value,
) -> Result<()> {
    set_led(ctx, OutputChannel::Yellow, path, value)
}

fn set_green<H: OutputPort, T>(
    ctx: &mut AppContext<H, T>,
    path: &str,
    value: &Value,
) -> Result<()> {
    set_led(ctx, OutputChannel::Green, path, value)
}

// ---------------------------------------------------------------------------
// temperature/
// ---------------------------------------------------------------------------

fn temperature<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.last_temperature)
}

fn rolling_avg<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.sampler.average())
}

fn temps_counted<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.sampler.count())
}

fn temp_task_enable<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.temp_task_enable)
}

fn lower_bound<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.controller.bounds().lower)
}

fn upper_bound<H, T>(ctx: &AppContext<H, T>) -> Value {
    json!(ctx.controller.bounds().upper)
}

fn set_lower_bound<H, T>(ctx: &mut AppContext<H, T>, path: &str, value: &Value) -> Result<()> {
    ctx.controller.set_bound(Bound::Lower, expect_f64(path, value)?);
    Ok(())
}

fn set_upper_bound<H, T>(ctx: &mut AppContext<H, T>, path: &str, value: &Value) -> Result<()> {
    ctx.controller.set_bound(Bound::Upper, expect_f64(path, value)?);
    Ok(())
}
