//! Integration tests for the scheduler → controller → outputs pipeline.
//!
//! A manual clock drives the service through whole seconds of simulated
//! time so every mode can be observed end to end on the mock board.

use std::time::Duration;

use serde_json::json;

use ledtherm::app::outputs::{Level, OutputChannel};
use ledtherm::control::mode::Mode;
use ledtherm::scheduler::TaskId;
use ledtherm::{DeviceError, Error};

use crate::mock_hw::{MockBoard, run_for, started};

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

// ── Rave ──────────────────────────────────────────────────────

#[test]
fn rave_writes_three_outputs_per_tick() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("rave")).unwrap();
    assert_eq!(svc.context().controller().mode(), &Mode::Rave);

    run_for(&mut svc, &clock, secs(1.0));

    assert_eq!(svc.get("led_task/rave_count").unwrap(), json!(4));
    assert_eq!(svc.hardware().writes.len(), 12);
}

#[test]
fn rave_mirror_matches_hardware() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("rave")).unwrap();
    run_for(&mut svc, &clock, secs(2.5));

    let leds = svc.get("leds").unwrap();
    for ch in OutputChannel::ALL {
        assert_eq!(
            leds[ch.name()],
            json!(svc.hardware().level(ch).as_u8()),
            "{ch}"
        );
    }
}

// ── Traffic ───────────────────────────────────────────────────

#[test]
fn traffic_light_follows_timing_table() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("traffic")).unwrap();

    run_for(&mut svc, &clock, secs(0.5)); // phase 2
    assert_eq!(svc.hardware().lit(), vec![OutputChannel::Red]);

    run_for(&mut svc, &clock, secs(3.0)); // phase 14
    assert_eq!(
        svc.hardware().lit(),
        vec![OutputChannel::Red, OutputChannel::Yellow]
    );

    run_for(&mut svc, &clock, secs(2.0)); // phase 22
    assert_eq!(svc.hardware().lit(), vec![OutputChannel::Green]);

    run_for(&mut svc, &clock, secs(3.0)); // phase 34
    assert_eq!(svc.hardware().lit(), vec![OutputChannel::Yellow]);
    assert_eq!(svc.get("led_task/traffic_phase").unwrap(), json!(34));

    run_for(&mut svc, &clock, secs(1.25)); // phase 39 wraps
    assert_eq!(svc.get("led_task/traffic_phase").unwrap(), json!(0));
    assert_eq!(svc.get("led_task/traffic_count").unwrap(), json!(1));
}

// ── Thermometer ───────────────────────────────────────────────

#[test]
fn thermometer_lights_band_indicator() {
    let board = MockBoard::with_temperatures(&[21.0, 21.75, 22.5, 22.0]);
    let (mut svc, clock) = started(board);
    svc.set("led_task/task_mode", &json!("thermometer")).unwrap();

    run_for(&mut svc, &clock, secs(1.0));
    assert_eq!(svc.hardware().lit(), vec![OutputChannel::Yellow]);

    run_for(&mut svc, &clock, secs(1.0));
    assert_eq!(svc.hardware().lit(), vec![OutputChannel::Green]);

    run_for(&mut svc, &clock, secs(1.0));
    assert_eq!(svc.hardware().lit(), vec![OutputChannel::Red]);

    // Exactly on the upper bound: everything off.
    run_for(&mut svc, &clock, secs(1.0));
    assert!(svc.hardware().lit().is_empty());
}

#[test]
fn thermometer_uses_updated_bounds() {
    let board = MockBoard::with_temperatures(&[25.0]);
    let (mut svc, clock) = started(board);
    svc.set("led_task/task_mode", &json!("thermometer")).unwrap();
    svc.set("temperature/temp_bounds", &json!({"lower": 24.0, "upper": 26.0}))
        .unwrap();

    run_for(&mut svc, &clock, secs(1.0));
    assert_eq!(svc.hardware().lit(), vec![OutputChannel::Green]);
}

// ── Temperature sampling ──────────────────────────────────────

#[test]
fn rolling_average_covers_last_ten_readings() {
    let temps: Vec<f64> = (1..=12).map(f64::from).collect();
    let (mut svc, clock) = started(MockBoard::with_temperatures(&temps));

    run_for(&mut svc, &clock, secs(12.0));

    assert_eq!(svc.get("temperature/temps_counted").unwrap(), json!(12));
    assert_eq!(svc.get("temperature/temperature").unwrap(), json!(12.0));
    assert_eq!(svc.get("temperature/rolling_avg").unwrap(), json!(7.5));
    assert!(svc.context().sampler().is_filled());
}

#[test]
fn temperature_is_sampled_in_every_mode() {
    let (mut svc, clock) = started(MockBoard::new());
    run_for(&mut svc, &clock, secs(3.0));
    assert_eq!(svc.hardware().reads, 3);
    // Command mode: the slow tick never touches the outputs.
    assert!(svc.hardware().writes.is_empty());
}

#[test]
fn sensor_fault_is_reported_and_loop_survives() {
    let (mut svc, clock) = started(MockBoard::new());
    run_for(&mut svc, &clock, secs(1.0));

    svc.hardware_mut().sensor_fault = Some(DeviceError::ThermocoupleFault(0x01));
    clock.advance(secs(1.0));
    assert_eq!(
        svc.poll(),
        Err(Error::Device(DeviceError::ThermocoupleFault(0x01)))
    );
    assert_eq!(svc.get("temperature/temps_counted").unwrap(), json!(1));

    svc.hardware_mut().sensor_fault = None;
    clock.advance(secs(1.0));
    svc.poll().unwrap();
    assert_eq!(svc.get("temperature/temps_counted").unwrap(), json!(2));
}

// ── LED task control ──────────────────────────────────────────

#[test]
fn disabling_led_task_freezes_counters() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("rave")).unwrap();
    run_for(&mut svc, &clock, secs(1.0));

    svc.set("led_task/enable", &json!(false)).unwrap();
    run_for(&mut svc, &clock, secs(2.0));
    assert_eq!(svc.get("led_task/rave_count").unwrap(), json!(4));
    assert_eq!(svc.get("led_task/enable").unwrap(), json!(false));
    assert!(!svc.context().scheduler().is_running(TaskId::Led));

    svc.set("led_task/enable", &json!(true)).unwrap();
    run_for(&mut svc, &clock, secs(1.0));
    assert_eq!(svc.get("led_task/rave_count").unwrap(), json!(8));
}

#[test]
fn enable_is_idempotent() {
    let (mut svc, clock) = started(MockBoard::new());
    clock.set(secs(0.1));
    svc.set("led_task/enable", &json!(true)).unwrap();
    // Still on the original schedule, not restarted from 0.1 s.
    assert_eq!(svc.next_deadline(), Some(secs(0.25)));

    svc.set("led_task/enable", &json!(false)).unwrap();
    svc.set("led_task/enable", &json!(false)).unwrap();
    assert_eq!(svc.next_deadline(), Some(secs(1.0)));
}

#[test]
fn interval_change_takes_effect() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("rave")).unwrap();
    svc.set("led_task/interval", &json!(0.5)).unwrap();
    assert_eq!(svc.get("led_task/interval").unwrap(), json!(0.5));

    run_for(&mut svc, &clock, secs(2.0));
    assert_eq!(svc.get("led_task/rave_count").unwrap(), json!(4));
}

#[test]
fn bad_intervals_are_rejected() {
    let (mut svc, _clock) = started(MockBoard::new());
    for bad in [json!(0), json!(-0.25), json!("fast"), json!(null)] {
        assert!(
            matches!(
                svc.set("led_task/interval", &bad),
                Err(Error::InvalidValue { .. })
            ),
            "{bad}"
        );
    }
    assert_eq!(svc.get("led_task/interval").unwrap(), json!(0.25));
}

#[test]
fn huge_interval_parks_led_task() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("rave")).unwrap();
    clock.set(secs(3600.0));
    svc.poll().unwrap();
    let ticks = svc.get("led_task/rave_count").unwrap();

    svc.set("led_task/interval", &json!(1.844_674_407_370_955e19))
        .unwrap();
    assert_eq!(svc.get("led_task/enable").unwrap(), json!(true));

    run_for(&mut svc, &clock, secs(2.0));
    assert_eq!(svc.get("led_task/rave_count").unwrap(), ticks);
    assert_eq!(svc.get("temperature/temps_counted").unwrap(), json!(3));
}

// ── Mode switching ────────────────────────────────────────────

#[test]
fn mode_switch_keeps_outputs_and_counters() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("traffic")).unwrap();
    run_for(&mut svc, &clock, secs(1.0)); // phase 4, red on

    svc.set("led_task/task_mode", &json!("command")).unwrap();
    run_for(&mut svc, &clock, secs(5.0));
    assert_eq!(svc.hardware().lit(), vec![OutputChannel::Red]);
    assert_eq!(svc.get("led_task/traffic_phase").unwrap(), json!(4));

    svc.set("led_task/task_mode", &json!("traffic")).unwrap();
    run_for(&mut svc, &clock, secs(0.25));
    assert_eq!(svc.get("led_task/traffic_phase").unwrap(), json!(5));
}

#[test]
fn unknown_mode_idles_outputs() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("disco")).unwrap();
    assert_eq!(svc.get("led_task/task_mode").unwrap(), json!("disco"));
    assert!(!svc.context().controller().mode().is_recognised());

    run_for(&mut svc, &clock, secs(3.0));
    assert!(svc.hardware().writes.is_empty());
}

#[test]
fn manual_led_write_in_command_mode_sticks() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("leds/green", &json!(1)).unwrap();
    run_for(&mut svc, &clock, secs(2.0));
    assert_eq!(svc.hardware().level(OutputChannel::Green), Level::High);
    assert_eq!(svc.get("leds/green").unwrap(), json!(1));
}

#[test]
fn failed_led_write_keeps_mirror() {
    let (mut svc, _clock) = started(MockBoard::new());
    svc.hardware_mut().outputs_offline = true;
    assert_eq!(
        svc.set("leds/red", &json!(1)),
        Err(Error::Device(DeviceError::Simulated("expander offline")))
    );
    assert_eq!(svc.get("leds/red").unwrap(), json!(0));
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn uptime_follows_clock() {
    let (svc, clock) = started(MockBoard::new());
    clock.advance(secs(42.5));
    assert_eq!(svc.get("server_uptime").unwrap(), json!(42.5));
}

#[test]
fn cleanup_stops_both_tasks() {
    let (mut svc, clock) = started(MockBoard::new());
    svc.set("led_task/task_mode", &json!("rave")).unwrap();
    svc.cleanup();
    run_for(&mut svc, &clock, secs(3.0));
    assert_eq!(svc.hardware().reads, 0);
    assert!(svc.hardware().writes.is_empty());
    assert_eq!(svc.next_deadline(), None);
}
