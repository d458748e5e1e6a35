//! ledtherm host entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  SimulatedBoard | Linux  MonotonicClock      Console (stdin)   │
//! │  (Output+Temperature)    (TimePort)          (get/set lines)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Scheduler · ModeController · RollingAverage · Tree    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `ledtherm [config.json]`.  Log level comes from `RUST_LOG`
//! (default `info`).  The config's `board` selects the simulator (default)
//! or the MCP23008/MAX31856 rig on Linux i2c-dev and spidev nodes.
#![deny(unused_must_use)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info};
use tracing_subscriber::EnvFilter;

use ledtherm::adapters::console::{self, CONSOLE_CHANNEL, Dispatch};
use ledtherm::adapters::sim::SimulatedBoard;
use ledtherm::adapters::time::MonotonicClock;
use ledtherm::app::ports::{OutputPort, TemperaturePort, TimePort};
use ledtherm::app::service::AppService;
use ledtherm::config::{BoardConfig, SystemConfig};

/// Longest the loop sleeps before checking the console and shutdown flag.
const MAX_IDLE: Duration = Duration::from_millis(20);

/// Simulated thermocouple set point: mid-band of the default bounds.
const SIM_SET_POINT_C: f64 = 21.75;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();

    let config = load_config()?;
    info!("ledtherm {} starting", env!("CARGO_PKG_VERSION"));

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
            .context("installing Ctrl-C handler")?;
    }

    match &config.board {
        BoardConfig::Simulated => {
            info!("using simulated board");
            let board = SimulatedBoard::new(SIM_SET_POINT_C, config.rave_seed);
            run(&config, board, &running)
        }
        BoardConfig::Linux {
            i2c_device,
            spi_device,
        } => open_and_run(&config, i2c_device, spi_device, &running),
    }
}

#[cfg(target_os = "linux")]
fn open_and_run(
    config: &SystemConfig,
    i2c_device: &str,
    spi_device: &str,
    running: &AtomicBool,
) -> Result<()> {
    let board = ledtherm::adapters::linux::open_board(i2c_device, spi_device)
        .context("opening LED/thermocouple board")?;
    run(config, board, running)
}

#[cfg(not(target_os = "linux"))]
fn open_and_run(_: &SystemConfig, _: &str, _: &str, _: &AtomicBool) -> Result<()> {
    anyhow::bail!("the linux board needs i2c-dev and spidev, which this platform lacks")
}

/// Serve the console and the scheduler until Ctrl-C or `quit`.
fn run<H>(config: &SystemConfig, board: H, running: &AtomicBool) -> Result<()>
where
    H: OutputPort + TemperaturePort,
{
    let mut service = AppService::new(config, board, MonotonicClock::new())?;
    service.start();

    console::spawn_stdin_reader().context("spawning console reader")?;

    // ── Main loop ──────────────────────────────────────────────
    while running.load(Ordering::SeqCst) {
        while let Ok(line) = CONSOLE_CHANNEL.try_receive() {
            match console::dispatch(&mut service, &line) {
                Dispatch::Reply(reply) => println!("{reply}"),
                Dispatch::Quit => running.store(false, Ordering::SeqCst),
            }
        }
        if !running.load(Ordering::SeqCst) {
            break;
        }

        if let Err(e) = service.poll() {
            error!("task failed: {e}");
        }

        let now = service.context().clock().now();
        let idle = service
            .next_deadline()
            .map_or(MAX_IDLE, |due| due.saturating_sub(now).min(MAX_IDLE));
        std::thread::sleep(idle);
    }

    service.cleanup();
    info!("ledtherm stopped");
    Ok(())
}

fn load_config() -> Result<SystemConfig> {
    let Some(path) = std::env::args().nth(1) else {
        info!("no config file given, using defaults");
        return Ok(SystemConfig::default());
    };
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("reading config file {path}"))?;
    let config =
        SystemConfig::from_json(&text).with_context(|| format!("parsing config file {path}"))?;
    info!("configuration loaded from {path}");
    Ok(config)
}
