//! Fuzz target: console line parsing and dispatch
//!
//! Feeds arbitrary text through `parse_command` and then through a live
//! service.  Whatever the input, the reply must be one line of valid JSON.
//!
//! cargo fuzz run fuzz_console_command

#![no_main]

use libfuzzer_sys::fuzz_target;
use ledtherm::adapters::console::{self, Dispatch};
use ledtherm::adapters::sim::SimulatedBoard;
use ledtherm::adapters::time::MonotonicClock;
use ledtherm::app::service::AppService;
use ledtherm::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    let _ = console::parse_command(line);

    let config = SystemConfig::default();
    let board = SimulatedBoard::new(21.75, Some(7));
    let Ok(mut svc) = AppService::new(&config, board, MonotonicClock::new()) else {
        return;
    };
    if let Dispatch::Reply(text) = console::dispatch(&mut svc, line) {
        assert!(!text.contains('\n'), "reply spans lines");
        assert!(
            serde_json::from_str::<serde_json::Value>(&text).is_ok(),
            "reply is not JSON"
        );
    }
});
