//! Fuzz target: `AppService::set`
//!
//! Splits the input into a path and a JSON body and writes it into the
//! parameter tree.  A write rejected for its paths must leave the tree
//! exactly as it was; any other outcome must leave the tree readable.
//!
//! cargo fuzz run fuzz_parameter_write

#![no_main]

use libfuzzer_sys::fuzz_target;
use ledtherm::adapters::sim::SimulatedBoard;
use ledtherm::adapters::time::MonotonicClock;
use ledtherm::app::service::AppService;
use ledtherm::config::SystemConfig;
use ledtherm::Error;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (path, body) = text.split_once(' ').unwrap_or((text, "null"));
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return;
    };

    let config = SystemConfig::default();
    let board = SimulatedBoard::new(21.75, Some(7));
    let Ok(mut svc) = AppService::new(&config, board, MonotonicClock::new()) else {
        return;
    };
    svc.start();

    let before = svc.get("").map(strip_uptime);
    match svc.set(path, &value) {
        Err(Error::NotFound(_) | Error::ReadOnly(_)) => {
            assert_eq!(svc.get("").map(strip_uptime), before, "rejected write changed state");
        }
        _ => {
            assert!(svc.get("").is_ok(), "tree unreadable after write");
        }
    }
});

/// Uptime moves on its own between the two reads.
fn strip_uptime(mut tree: Value) -> Value {
    if let Some(map) = tree.as_object_mut() {
        map.remove("server_uptime");
    }
    tree
}
